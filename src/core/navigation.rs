use std::path::Path;
use tracing::{debug, warn};
use crate::core::details::{ChildEntry, NodeDetails};
use crate::core::reconstruction::{reconstruct, root_board, ReplayedLine};
use crate::database::rows::{NodeRow, SearchRow, TreeRow};
use crate::database::TraceStore;
use crate::error::ViewerError;
use crate::output::BoardDisplay;

pub const ROOT_NODE_INDEX: i64 = 1;

/// Where in a tree the viewer currently is.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NodeCursor {
    pub tree: i64,
    pub node_index: i64,
    pub move_path: Vec<String>,
}

impl NodeCursor {
    pub fn at_root(tree: i64) -> Self {
        Self {
            tree,
            node_index: ROOT_NODE_INDEX,
            move_path: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.node_index == ROOT_NODE_INDEX
    }
}

/// What is shown for the node under the cursor. Rebuilt on every transition.
#[derive(Clone, Debug)]
pub struct NodeView {
    pub line: ReplayedLine,
    pub node: Option<NodeRow>,
    pub children: Vec<ChildEntry>,
    pub details: NodeDetails,
}

/// Keeps track of the selected search, tree and node, and reloads everything from the trace on each step.
pub struct Navigator<D: BoardDisplay> {
    store: Option<TraceStore>,
    display: D,
    searches: Vec<SearchRow>,
    selected_search: Option<usize>,
    trees: Vec<TreeRow>,
    selected_tree: Option<usize>,
    cursor: Option<NodeCursor>,
    view: Option<NodeView>,
}

impl<D: BoardDisplay> Navigator<D> {
    pub fn new(display: D) -> Self {
        Self {
            store: None,
            display,
            searches: Vec::new(),
            selected_search: None,
            trees: Vec::new(),
            selected_tree: None,
            cursor: None,
            view: None,
        }
    }

    /// `None` means the file choice was cancelled: nothing changes. If the file can't be opened the
    /// previous trace stays loaded.
    pub async fn open_database(&mut self, path: Option<&Path>) -> Result<(), ViewerError> {
        let path = match path {
            Some(path) => path,
            None => return Ok(()),
        };

        let store = TraceStore::open(path).await?;
        self.load_store(store).await
    }

    /// Replaces the current trace with `store` and selects its most recent search that can be shown.
    /// Searches with an unusable root FEN are skipped. If there are searches but none of them can be
    /// shown, the previous trace stays loaded.
    pub async fn load_store(&mut self, store: TraceStore) -> Result<(), ViewerError> {
        let searches = store.searches().await?;

        let mut selection = None;
        let mut skipped = None;
        for (position, search) in searches.iter().enumerate() {
            match load_search(&store, search).await {
                Ok(loaded) => {
                    selection = Some((position, loaded));
                    break;
                },
                Err(ViewerError::InvalidFen(fen)) => {
                    warn!("Skipping search {} with root FEN `{fen}`", search.id);
                    skipped = Some(ViewerError::InvalidFen(fen));
                },
                Err(error) => return Err(error),
            }
        }

        if let (None, Some(error)) = (&selection, skipped) {
            return Err(error);
        }

        self.store = Some(store);
        self.searches = searches;
        match selection {
            Some((position, loaded)) => self.commit_search(position, loaded),
            None => {
                self.selected_search = None;
                self.trees.clear();
                self.selected_tree = None;
                self.cursor = None;
                self.view = None;
            },
        }

        Ok(())
    }

    pub async fn select_search(&mut self, position: usize) -> Result<(), ViewerError> {
        let search = self.searches.get(position).ok_or(ViewerError::NoSuchSearch(position))?;
        let loaded = load_search(self.store()?, search).await?;

        self.commit_search(position, loaded);
        Ok(())
    }

    pub async fn select_tree(&mut self, position: usize) -> Result<(), ViewerError> {
        let tree = self.trees.get(position).ok_or(ViewerError::NoSuchTree(position))?;
        let (cursor, view) = self.view_for(NodeCursor::at_root(tree.id)).await?;

        self.selected_tree = Some(position);
        self.commit_view(cursor, view);
        Ok(())
    }

    pub async fn descend_to_child(&mut self, child_index: i64, move_token: &str) -> Result<(), ViewerError> {
        let mut cursor = self.cursor.clone().ok_or(ViewerError::NoTreeSelected)?;
        cursor.move_path.push(move_token.to_string());
        cursor.node_index = child_index;

        let (cursor, view) = self.view_for(cursor).await?;
        self.commit_view(cursor, view);
        Ok(())
    }

    /// Descends to the `position`th entry of the current child listing.
    pub async fn descend_to_listed(&mut self, position: usize) -> Result<(), ViewerError> {
        let child = self.children()
            .get(position)
            .cloned()
            .ok_or(ViewerError::NoSuchChild(position))?;

        self.descend_to_child(child.node_index, &child.move_token).await
    }

    /// Steps back to the parent node. Does nothing at the root, or if the current node isn't in the trace.
    pub async fn ascend(&mut self) -> Result<(), ViewerError> {
        let mut cursor = match &self.cursor {
            Some(cursor) if !cursor.is_root() => cursor.clone(),
            _ => return Ok(()),
        };

        let parent_index = match self.store()?.parent_index(cursor.tree, cursor.node_index).await? {
            Some(0) => ROOT_NODE_INDEX,
            Some(x) => x,
            None => return Ok(()),
        };
        cursor.move_path.pop();
        cursor.node_index = parent_index;

        let (cursor, view) = self.view_for(cursor).await?;
        self.commit_view(cursor, view);
        Ok(())
    }

    async fn view_for(&self, cursor: NodeCursor) -> Result<(NodeCursor, NodeView), ViewerError> {
        let search = self.selected_search().ok_or(ViewerError::NoTreeSelected)?;
        load_view(self.store()?, &search.root_fen, cursor).await
    }

    fn commit_search(&mut self, position: usize, loaded: LoadedSearch) {
        self.selected_search = Some(position);
        self.trees = loaded.trees;

        match loaded.root {
            Some((cursor, view)) => {
                self.selected_tree = Some(0);
                self.commit_view(cursor, view);
            },
            None => {
                self.selected_tree = None;
                self.cursor = None;
                self.view = None;
            },
        }
    }

    /// Makes `cursor` current and redraws the board.
    fn commit_view(&mut self, cursor: NodeCursor, view: NodeView) {
        debug!("Moving to node {} of tree {}", cursor.node_index, cursor.tree);
        self.display.show_position(&view.line.fen());

        self.cursor = Some(cursor);
        self.view = Some(view);
    }

    /// Draws the current position again, without touching the trace.
    pub fn redraw(&mut self) {
        if let Some(view) = &self.view {
            self.display.show_position(&view.line.fen());
        }
    }

    fn store(&self) -> Result<&TraceStore, ViewerError> {
        self.store.as_ref().ok_or(ViewerError::NoDatabase)
    }

    pub fn is_loaded(&self) -> bool {
        self.store.is_some()
    }

    pub fn searches(&self) -> &[SearchRow] {
        &self.searches
    }

    pub fn selected_search(&self) -> Option<&SearchRow> {
        self.selected_search.and_then(|x| self.searches.get(x))
    }

    pub fn trees(&self) -> &[TreeRow] {
        &self.trees
    }

    pub fn selected_tree(&self) -> Option<&TreeRow> {
        self.selected_tree.and_then(|x| self.trees.get(x))
    }

    pub fn cursor(&self) -> Option<&NodeCursor> {
        self.cursor.as_ref()
    }

    pub fn view(&self) -> Option<&NodeView> {
        self.view.as_ref()
    }

    pub fn children(&self) -> &[ChildEntry] {
        self.view.as_ref().map(|x| x.children.as_slice()).unwrap_or(&[])
    }

    /// Only blocked at the root (and when nothing is selected).
    pub fn can_ascend(&self) -> bool {
        self.cursor.as_ref().map(|x| !x.is_root()).unwrap_or(false)
    }

    pub fn display(&self) -> &D {
        &self.display
    }
}

/// The trees of a search, and the root view of its deepest tree if it has any.
struct LoadedSearch {
    trees: Vec<TreeRow>,
    root: Option<(NodeCursor, NodeView)>,
}

async fn load_search(store: &TraceStore, search: &SearchRow) -> Result<LoadedSearch, ViewerError> {
    let trees = store.trees(search.id).await?;
    debug!("Loaded search {} with {} trees", search.id, trees.len());

    let root = match trees.first() {
        Some(tree) => Some(load_view(store, &search.root_fen, NodeCursor::at_root(tree.id)).await?),
        None => None,
    };

    Ok(LoadedSearch { trees, root })
}

/// Rebuilds the board, node, children and details for `cursor`. The cursor comes back without the
/// moves that could not be replayed, so the failure isn't repeated on every step.
async fn load_view(store: &TraceStore, root_fen: &str, mut cursor: NodeCursor) -> Result<(NodeCursor, NodeView), ViewerError> {
    let root = root_board(root_fen)?;
    let line = reconstruct(root, cursor.move_path.as_slice());
    cursor.move_path.truncate(line.applied());

    let node = store.node(cursor.tree, cursor.node_index).await?;
    let children = store.children(cursor.tree, cursor.node_index).await?;

    let best_move = node.as_ref().and_then(|x| x.best_move.as_deref());
    let children = children.iter()
        .map(|child| ChildEntry::from_child(child, line.current(), best_move))
        .collect();
    let details = NodeDetails::from_node(node.as_ref(), &line);

    Ok((cursor, NodeView {
        line,
        node,
        children,
        details,
    }))
}
