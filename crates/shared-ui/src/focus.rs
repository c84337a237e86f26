/// Focusable elements the runtime can move focus to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    SearchInput,
    Card(String),
    ModalClose,
}

/// Keeps Tab navigation inside a container.
#[derive(Debug, Clone)]
pub struct FocusTrap {
    order: Vec<FocusTarget>,
}

impl FocusTrap {
    pub fn new(order: Vec<FocusTarget>) -> Self {
        Self { order }
    }

    /// Where focus must go instead of the browser default, if anywhere.
    ///
    /// Tab on the last element wraps to the first, Shift+Tab on the first
    /// wraps to the last. Focus outside the container is pulled back in.
    pub fn redirect(&self, current: Option<&FocusTarget>, backwards: bool) -> Option<FocusTarget> {
        let first = self.order.first()?;
        let last = self.order.last()?;

        match current {
            Some(target) if !self.order.contains(target) => Some(first.clone()),
            None => Some(first.clone()),
            Some(target) if backwards && target == first => Some(last.clone()),
            Some(target) if !backwards && target == last => Some(first.clone()),
            Some(_) => None,
        }
    }
}
