//! render::marks
//!
//! Groups a block's spans into a tree of marks.
//!
//! Adjacent spans that share a mark are wrapped by a single mark node, so
//! `**bold _both_** plain` becomes
//! `strong("bold ", em("both")), "plain"` rather than one wrapper per
//! span. Within a span, marks that continue over more following spans are
//! opened first (outermost); ties fall back to the known decorator order
//! and then to the mark name.

use crate::content::{Block, MarkDef, Span};

/// Tie-break order for decorators covering the same run of spans.
const DECORATOR_PRECEDENCE: &[&str] = &["strong", "em", "code", "underline", "strike-through"];

/// A node of the mark tree.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkNode<'a> {
    /// Plain text (never contains a newline)
    Text(&'a str),
    /// A newline inside span text
    LineBreak,
    /// A non-text inline child
    Inline(&'a Span),
    /// A mark wrapping its children
    Marked {
        /// The mark as written on the span: a decorator name or annotation key
        key: &'a str,
        /// Decorator name, or the annotation's `_type`
        mark_type: &'a str,
        /// Annotation definition, when the key refers to one
        def: Option<&'a MarkDef>,
        children: Vec<MarkNode<'a>>,
    },
}

/// Build the mark tree for a block.
///
/// # Example
///
/// ```
/// use groundwork::content::Block;
/// use groundwork::render::marks::{build_mark_tree, MarkNode};
///
/// let block = Block::new("normal")
///     .marked("bold ", &["strong"])
///     .marked("both", &["strong", "em"])
///     .text(" plain");
///
/// let tree = build_mark_tree(&block);
/// assert_eq!(tree.len(), 2);
/// assert!(matches!(tree[0], MarkNode::Marked { mark_type: "strong", .. }));
/// assert_eq!(tree[1], MarkNode::Text(" plain"));
/// ```
pub fn build_mark_tree(block: &Block) -> Vec<MarkNode<'_>> {
    let spans = &block.children;
    let mut arena: Vec<Pending<'_>> = vec![Pending {
        key: None,
        children: Vec::new(),
    }];
    // Indexes into `arena` of the currently open marks, root first.
    let mut stack: Vec<usize> = vec![0];

    for (i, span) in spans.iter().enumerate() {
        let mut needed = sorted_marks(spans, i);

        // Keep open marks this span still carries, close the rest.
        let mut keep = 1;
        while keep < stack.len() {
            let open = arena[stack[keep]].key;
            match needed.iter().position(|m| Some(*m) == open) {
                Some(pos) => {
                    needed.remove(pos);
                    keep += 1;
                }
                None => break,
            }
        }
        stack.truncate(keep);

        for key in needed {
            let idx = arena.len();
            arena.push(Pending {
                key: Some(key),
                children: Vec::new(),
            });
            let parent = stack[stack.len() - 1];
            arena[parent].children.push(Child::Node(idx));
            stack.push(idx);
        }

        let current = stack[stack.len() - 1];
        let children = &mut arena[current].children;
        if span.is_text() {
            let mut lines = span.text.split('\n');
            if let Some(first) = lines.next() {
                push_text(children, first);
            }
            for line in lines {
                children.push(Child::Break);
                push_text(children, line);
            }
        } else {
            children.push(Child::Inline(span));
        }
    }

    assemble(&arena, 0, block)
}

struct Pending<'a> {
    key: Option<&'a str>,
    children: Vec<Child<'a>>,
}

enum Child<'a> {
    Node(usize),
    Text(&'a str),
    Break,
    Inline(&'a Span),
}

fn push_text<'a>(children: &mut Vec<Child<'a>>, text: &'a str) {
    if !text.is_empty() {
        children.push(Child::Text(text));
    }
}

fn assemble<'a>(arena: &[Pending<'a>], idx: usize, block: &'a Block) -> Vec<MarkNode<'a>> {
    arena[idx]
        .children
        .iter()
        .map(|child| match child {
            Child::Node(n) => {
                let key = arena[*n].key.unwrap_or_default();
                let def = block.find_mark_def(key);
                MarkNode::Marked {
                    key,
                    mark_type: def.map_or(key, |d| d.kind.as_str()),
                    def,
                    children: assemble(arena, *n, block),
                }
            }
            Child::Text(text) => MarkNode::Text(text),
            Child::Break => MarkNode::LineBreak,
            Child::Inline(span) => MarkNode::Inline(span),
        })
        .collect()
}

/// Marks of `spans[index]`, ordered outermost first.
fn sorted_marks(spans: &[Span], index: usize) -> Vec<&str> {
    let span = &spans[index];
    let mut marks: Vec<&str> = Vec::new();
    for mark in &span.marks {
        if !marks.contains(&mark.as_str()) {
            marks.push(mark);
        }
    }

    let run_length = |mark: &str| {
        spans[index..]
            .iter()
            .take_while(|s| s.marks.iter().any(|m| m == mark))
            .count()
    };
    let precedence = |mark: &str| {
        DECORATOR_PRECEDENCE
            .iter()
            .position(|d| *d == mark)
            .map_or(-1, |p| p as isize)
    };

    marks.sort_by(|a, b| {
        run_length(*b)
            .cmp(&run_length(*a))
            .then_with(|| precedence(*a).cmp(&precedence(*b)))
            .then_with(|| a.cmp(b))
    });
    marks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MarkDef;

    fn text_of(nodes: &[MarkNode<'_>]) -> String {
        nodes
            .iter()
            .map(|n| match n {
                MarkNode::Text(t) => t.to_string(),
                MarkNode::LineBreak => "\n".to_string(),
                MarkNode::Inline(_) => String::new(),
                MarkNode::Marked { children, .. } => text_of(children),
            })
            .collect()
    }

    #[test]
    fn plain_block_has_flat_text() {
        let block = Block::new("normal").text("Hello ").text("world");
        let tree = build_mark_tree(&block);
        assert_eq!(tree, vec![MarkNode::Text("Hello "), MarkNode::Text("world")]);
    }

    #[test]
    fn shared_mark_wraps_adjacent_spans_once() {
        let block = Block::new("normal")
            .marked("a", &["em"])
            .marked("b", &["em", "strong"])
            .marked("c", &["em"]);
        let tree = build_mark_tree(&block);
        assert_eq!(tree.len(), 1);
        let MarkNode::Marked { mark_type, children, .. } = &tree[0] else {
            panic!("expected em wrapper");
        };
        assert_eq!(*mark_type, "em");
        assert_eq!(children.len(), 3);
        assert!(matches!(children[1], MarkNode::Marked { mark_type: "strong", .. }));
        assert_eq!(text_of(&tree), "abc");
    }

    #[test]
    fn longer_run_is_outermost() {
        let block = Block::new("normal")
            .marked("x", &["strong", "em"])
            .marked("y", &["em"]);
        let tree = build_mark_tree(&block);
        assert!(matches!(tree[0], MarkNode::Marked { mark_type: "em", .. }));
    }

    #[test]
    fn equal_runs_use_decorator_precedence() {
        let block = Block::new("normal").marked("x", &["underline", "code", "strong"]);
        let tree = build_mark_tree(&block);
        let MarkNode::Marked { mark_type: outer, children, .. } = &tree[0] else {
            panic!("expected mark");
        };
        assert_eq!(*outer, "strong");
        let MarkNode::Marked { mark_type: middle, .. } = &children[0] else {
            panic!("expected nested mark");
        };
        assert_eq!(*middle, "code");
    }

    #[test]
    fn annotation_key_resolves_def() {
        let block = Block::new("normal")
            .marked("site", &["lnk"])
            .mark_def(MarkDef::link("lnk", Some("https://example.com")));
        let tree = build_mark_tree(&block);
        match &tree[0] {
            MarkNode::Marked { key, mark_type, def, .. } => {
                assert_eq!(*key, "lnk");
                assert_eq!(*mark_type, "link");
                assert_eq!(def.unwrap().href.as_deref(), Some("https://example.com"));
            }
            other => panic!("expected link mark, got {:?}", other),
        }
    }

    #[test]
    fn unknown_mark_keeps_its_key_as_type() {
        let block = Block::new("normal").marked("glow", &["sparkle"]);
        let tree = build_mark_tree(&block);
        assert!(matches!(tree[0], MarkNode::Marked { mark_type: "sparkle", def: None, .. }));
    }

    #[test]
    fn newlines_become_breaks() {
        let block = Block::new("normal").text("one\ntwo\n");
        let tree = build_mark_tree(&block);
        assert_eq!(
            tree,
            vec![MarkNode::Text("one"), MarkNode::LineBreak, MarkNode::Text("two"), MarkNode::LineBreak]
        );
    }

    #[test]
    fn duplicate_marks_collapse() {
        let block = Block::new("normal").marked("x", &["em", "em"]);
        let tree = build_mark_tree(&block);
        let MarkNode::Marked { children, .. } = &tree[0] else {
            panic!("expected mark");
        };
        assert_eq!(children, &vec![MarkNode::Text("x")]);
    }

    #[test]
    fn unknown_marks_sort_before_decorators_then_by_name() {
        let block = Block::new("normal").marked("x", &["b", "strong", "a"]);
        assert_eq!(sorted_marks(&block.children, 0), vec!["a", "b", "strong"]);
    }
}
