use perl_syntax::SyntaxKind::{self, *};
use text_size::TextRange;

use super::{CLOSERS, Context, statement, unmatched_closer};
use crate::parser::Parser;

/// Parses a bracketed structure of the given kind, opener included.
///
/// A closer that belongs to an enclosing structure ends this one as
/// incomplete without being consumed.
pub(crate) fn structure(p: &mut Parser<'_>, kind: SyntaxKind) {
    let m = p.start();
    let opener = p.nth(0).clone();
    let closer = match opener.kind {
        LEFT_PAREN => RIGHT_PAREN,
        LEFT_BRACKET => RIGHT_BRACKET,
        _ => RIGHT_BRACE,
    };
    p.advance();
    p.open.push(closer);

    let context = if kind == STRUCTURE_BLOCK { Context::Block } else { Context::Expression };
    let closed = loop {
        match p.peek_kind() {
            EOF => break false,
            next if next == closer => {
                p.advance();
                break true;
            }
            next if CLOSERS.contains(next) => {
                let outer = &p.open[..p.open.len() - 1];
                if outer.contains(&next) {
                    break false;
                }
                unmatched_closer(p);
            }
            _ => statement(p, context),
        }
    };
    p.open.pop();

    if closed {
        m.complete(p, kind);
    } else {
        p.proxy().unmatched_brace(&opener);
        m.complete_incomplete(p, kind);
    }
    p.set_previous(Some((kind, TextRange::default())));
}

/// Classifies an opener inside an ordinary statement by what precedes it.
pub(crate) fn expression_structure(p: &mut Parser<'_>, opener: SyntaxKind) -> SyntaxKind {
    let after_arrow = p.previous() == Some(OPERATOR) && p.previous_text() == "->";
    match (opener, p.previous()) {
        (LEFT_PAREN, _) => STRUCTURE_LIST,
        (LEFT_BRACKET, Some(SYMBOL | MAGIC | STRUCTURE_SUBSCRIPT | STRUCTURE_LIST)) => {
            STRUCTURE_SUBSCRIPT
        }
        (LEFT_BRACKET, _) if after_arrow => STRUCTURE_SUBSCRIPT,
        (LEFT_BRACKET, _) => STRUCTURE_CONSTRUCTOR,
        (_, Some(SYMBOL | MAGIC | STRUCTURE_SUBSCRIPT)) => STRUCTURE_SUBSCRIPT,
        (_, _) if after_arrow => STRUCTURE_SUBSCRIPT,
        (_, None | Some(OPERATOR)) => STRUCTURE_CONSTRUCTOR,
        (_, Some(WORD)) if matches!(p.previous_text(), "return" | "bless" | "constant") => {
            STRUCTURE_CONSTRUCTOR
        }
        (_, _) if pair_follows(p) => STRUCTURE_CONSTRUCTOR,
        (_, _) => STRUCTURE_BLOCK,
    }
}

/// `{ key => ...`: the brace opens a hash whatever precedes it.
fn pair_follows(p: &mut Parser<'_>) -> bool {
    let key = p.nth_kind(1);
    (key == WORD || key.base() == Some(QUOTE)) && p.nth_text(2) == "=>"
}

/// `sub`, `package` and scheduled blocks: any brace is the body.
pub(crate) fn declaration_structure(p: &mut Parser<'_>, opener: SyntaxKind) -> SyntaxKind {
    match opener {
        LEFT_BRACE => STRUCTURE_BLOCK,
        _ => expression_structure(p, opener),
    }
}

pub(crate) fn given_structure(p: &mut Parser<'_>, opener: SyntaxKind) -> SyntaxKind {
    header_structure(p, opener, STRUCTURE_GIVEN)
}

pub(crate) fn when_structure(p: &mut Parser<'_>, opener: SyntaxKind) -> SyntaxKind {
    header_structure(p, opener, STRUCTURE_WHEN)
}

fn header_structure(p: &mut Parser<'_>, opener: SyntaxKind, header: SyntaxKind) -> SyntaxKind {
    match opener {
        LEFT_PAREN if p.previous() == Some(WORD) && matches!(p.previous_text(), "given" | "when") => {
            header
        }
        _ => declaration_structure(p, opener),
    }
}

#[cfg(test)]
mod tests {
    use perl_syntax::SyntaxKind::{self, *};
    use perl_syntax::{IsA, Recursive, SyntaxElement};

    use crate::parse;

    fn structures(text: &str) -> Vec<(SyntaxKind, String)> {
        let document = parse(text);
        document
            .find(&Recursive(IsA(STRUCTURE)))
            .into_iter()
            .filter_map(SyntaxElement::into_node)
            .map(|node| (node.kind(), node.text().to_owned()))
            .collect()
    }

    #[test]
    fn braces_after_values_are_subscripts() {
        assert_eq!(
            structures("$h{a}; $r->{b}; $x[0]; $h{a}{b};"),
            vec![
                (STRUCTURE_SUBSCRIPT, "{a}".to_owned()),
                (STRUCTURE_SUBSCRIPT, "{b}".to_owned()),
                (STRUCTURE_SUBSCRIPT, "[0]".to_owned()),
                (STRUCTURE_SUBSCRIPT, "{a}".to_owned()),
                (STRUCTURE_SUBSCRIPT, "{b}".to_owned()),
            ]
        );
    }

    #[test]
    fn anonymous_data_is_constructed() {
        assert_eq!(
            structures("$x = { a => [1] }; return {};"),
            vec![
                (STRUCTURE_CONSTRUCTOR, "{ a => [1] }".to_owned()),
                (STRUCTURE_CONSTRUCTOR, "[1]".to_owned()),
                (STRUCTURE_CONSTRUCTOR, "{}".to_owned()),
            ]
        );
        assert_eq!(
            structures("return bless {}, $c; use constant { A => 1 }; f { 'k' => 2 };"),
            vec![
                (STRUCTURE_CONSTRUCTOR, "{}".to_owned()),
                (STRUCTURE_CONSTRUCTOR, "{ A => 1 }".to_owned()),
                (STRUCTURE_CONSTRUCTOR, "{ 'k' => 2 }".to_owned()),
            ]
        );
    }

    #[test]
    fn code_braces_are_blocks() {
        assert_eq!(
            structures("map { $_ } @x; sub f { 1 }"),
            vec![(STRUCTURE_BLOCK, "{ $_ }".to_owned()), (STRUCTURE_BLOCK, "{ 1 }".to_owned())]
        );
    }

    #[test]
    fn control_headers() {
        assert_eq!(
            structures("if ($a) { } elsif ($b) { } else { }"),
            vec![
                (STRUCTURE_CONDITION, "($a)".to_owned()),
                (STRUCTURE_BLOCK, "{ }".to_owned()),
                (STRUCTURE_CONDITION, "($b)".to_owned()),
                (STRUCTURE_BLOCK, "{ }".to_owned()),
                (STRUCTURE_BLOCK, "{ }".to_owned()),
            ]
        );
        assert_eq!(
            structures("for my $i (@l) { } given ($x) { when (1) { } }"),
            vec![
                (STRUCTURE_FOR, "(@l)".to_owned()),
                (STRUCTURE_BLOCK, "{ }".to_owned()),
                (STRUCTURE_GIVEN, "($x)".to_owned()),
                (STRUCTURE_BLOCK, "{ when (1) { } }".to_owned()),
                (STRUCTURE_WHEN, "(1)".to_owned()),
                (STRUCTURE_BLOCK, "{ }".to_owned()),
            ]
        );
    }
}
