//! List nesting
//!
//! List items are stored as ordinary blocks with `listItem` and `level` set.
//! [`nest_lists`] groups runs of them into [`List`]s, hanging deeper levels off
//! the last item of the enclosing list.

use crate::model::Block;

/// A top-level node after list nesting
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Block(Block),
    List(List),
}

/// A group of consecutive list items sharing type and level
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    /// Derived from the first item's key (`<key>-parent`)
    pub key: Option<String>,
    /// List type taken from `listItem` (`bullet`, `number`, ...)
    pub list_type: String,
    pub level: u32,
    pub items: Vec<ListItem>,
}

impl List {
    fn from_block(block: &Block, list_type: &str) -> Self {
        Self {
            key: block.key.as_ref().map(|key| format!("{}-parent", key)),
            list_type: list_type.to_string(),
            level: block.level(),
            items: vec![ListItem::new(block.clone())],
        }
    }
}

/// One list item with any lists nested beneath it
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub block: Block,
    pub sublists: Vec<List>,
}

impl ListItem {
    pub fn new(block: Block) -> Self {
        Self {
            block,
            sublists: Vec::new(),
        }
    }
}

/// Group list item blocks into nested lists
pub fn nest_lists(blocks: &[Block]) -> Vec<Node> {
    let mut tree = Vec::new();
    let mut open: Vec<List> = Vec::new();

    for block in blocks {
        let Some(list_type) = block.list_item.as_deref() else {
            close_lists(&mut open, &mut tree, 0);
            tree.push(Node::Block(block.clone()));
            continue;
        };

        let level = block.level();
        while open.last().is_some_and(|list| list.level > level) {
            close_list(&mut open, &mut tree);
        }

        // Same level, different type: sibling list
        if open
            .last()
            .is_some_and(|list| list.level == level && list.list_type != list_type)
        {
            close_list(&mut open, &mut tree);
        }

        match open.last_mut() {
            Some(list) if list.level == level => list.items.push(ListItem::new(block.clone())),
            _ => open.push(List::from_block(block, list_type)),
        }
    }

    close_lists(&mut open, &mut tree, 0);
    tree
}

fn close_lists(open: &mut Vec<List>, tree: &mut Vec<Node>, depth: usize) {
    while open.len() > depth {
        close_list(open, tree);
    }
}

/// Close the innermost open list, attaching it to its parent item
fn close_list(open: &mut Vec<List>, tree: &mut Vec<Node>) {
    let Some(list) = open.pop() else { return };
    match open.last_mut().and_then(|parent| parent.items.last_mut()) {
        Some(item) => item.sublists.push(list),
        None => tree.push(Node::List(list)),
    }
}
