use itertools::Itertools;
use crate::core::details::ChildEntry;

pub mod terminal;

/// Anything that can draw a board given its FEN.
pub trait BoardDisplay {
    fn show_position(&mut self, fen: &str);
}

/// Lays out the child moves in rows of `columns`.
///
/// PV children are marked with `*`, the chosen best move is bracketed.
pub fn render_children(children: &[ChildEntry], columns: usize) -> String {
    if children.is_empty() {
        return "(no children)".to_string();
    }

    let cells = children.iter()
        .enumerate()
        .map(|(position, child)| {
            let marker = if child.pv { "*" } else { "" };
            let text = format!("{}{}", child, marker);

            if child.best {
                format!("{:>3}: [{}]", position, text)
            } else {
                format!("{:>3}: {}", position, text)
            }
        })
        .collect::<Vec<_>>();

    cells.chunks(columns.max(1))
        .map(|row| row.join("  "))
        .join("\n")
}

#[cfg(test)]
fn entry(label: &str, pv: bool, best: bool) -> ChildEntry {
    ChildEntry {
        node_index: 2,
        move_token: "e2e4".to_string(),
        label: label.to_string(),
        score: None,
        pv,
        best,
    }
}

#[test]
fn check_empty_children() {
    assert_eq!(render_children(&[], 10), "(no children)");
}

#[test]
fn check_children_grid() {
    let children = vec![entry("e4", true, true), entry("d4", true, false), entry("Nf3", false, false)];

    assert_eq!(render_children(&children, 2), "  0: [e4*]    1: d4*\n  2: Nf3");
}
