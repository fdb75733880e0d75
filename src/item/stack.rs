use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use serde_json::{Map, Value};

use super::{Item, ItemId, MAX_STACK_SIZE};

/// Shared handle to a stack that lives somewhere in the world
///
/// Item targets are passed around as this handle so an adapter can keep
/// operating on the very stack it was created for.
pub type SharedStack = Rc<RefCell<ItemStack>>;

/// A quantity of one item type plus its per-stack data
#[derive(Clone, Default)]
pub struct ItemStack {
    item: Option<Arc<dyn Item>>,
    count: u32,
    tag: Map<String, Value>,
}

impl ItemStack {
    /// The empty stack
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a new item stack
    pub fn new(item: Arc<dyn Item>, count: u32) -> Self {
        Self {
            item: Some(item),
            count,
            tag: Map::new(),
        }
    }

    /// Create a single item
    pub fn single(item: Arc<dyn Item>) -> Self {
        Self::new(item, 1)
    }

    pub fn with_tag(mut self, tag: Map<String, Value>) -> Self {
        self.tag = tag;
        self
    }

    /// Wrap into a shared handle usable as an item target
    pub fn into_shared(self) -> SharedStack {
        Rc::new(RefCell::new(self))
    }

    pub fn item(&self) -> Option<&Arc<dyn Item>> {
        if self.is_empty() {
            None
        } else {
            self.item.as_ref()
        }
    }

    pub fn item_id(&self) -> Option<ItemId> {
        self.item().map(|item| item.id())
    }

    pub fn count(&self) -> u32 {
        if self.item.is_some() {
            self.count
        } else {
            0
        }
    }

    pub fn tag(&self) -> &Map<String, Value> {
        &self.tag
    }

    pub fn tag_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.tag
    }

    /// Check if stack is empty
    pub fn is_empty(&self) -> bool {
        self.item.is_none() || self.count == 0
    }

    /// Get the maximum stack size for this item type
    pub fn max_stack_size(&self) -> u32 {
        self.item()
            .map(|item| item.max_stack_size())
            .unwrap_or(MAX_STACK_SIZE)
    }

    /// Same item and same per-stack data, so the two can share a slot
    pub fn can_stack_with(&self, other: &ItemStack) -> bool {
        match (self.item_id(), other.item_id()) {
            (Some(a), Some(b)) => a == b && self.tag == other.tag,
            _ => false,
        }
    }

    /// Copy of this stack with a different count
    pub fn copy_with_count(&self, count: u32) -> ItemStack {
        if self.item.is_none() || count == 0 {
            return ItemStack::empty();
        }
        ItemStack {
            item: self.item.clone(),
            count,
            tag: self.tag.clone(),
        }
    }

    /// Split the stack, taking up to the specified count
    pub fn split(&mut self, count: u32) -> ItemStack {
        let taken = count.min(self.count());
        let result = self.copy_with_count(taken);
        self.shrink(taken);
        result
    }

    pub fn grow(&mut self, count: u32) {
        self.count = self.count.saturating_add(count);
    }

    pub fn shrink(&mut self, count: u32) {
        self.count = self.count.saturating_sub(count);
    }
}

impl PartialEq for ItemStack {
    fn eq(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return self.is_empty() && other.is_empty();
        }
        self.item_id() == other.item_id() && self.count == other.count && self.tag == other.tag
    }
}

impl fmt::Debug for ItemStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "ItemStack(empty)");
        }
        f.debug_struct("ItemStack")
            .field("item_id", &self.item_id())
            .field("count", &self.count)
            .field("tag", &self.tag)
            .finish()
    }
}
