/// Presentation-owned view state, passed explicitly into rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Summary block shown.
    pub expanded: bool,
    /// A fetch is in flight.
    pub loading: bool,
}

impl ViewState {
    pub fn loading() -> Self {
        Self {
            expanded: false,
            loading: true,
        }
    }

    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }

    pub fn finish_loading(&mut self) {
        self.loading = false;
    }
}
