use crate::sheet::SheetView;
use tracing::debug;

/// Hides non-printable elements for as long as it lives. Dropping it puts the
/// view back the way it was, whichever way the export returned.
pub struct PrintScope<'a> {
    view: &'a mut SheetView,
    previous: bool,
}

impl<'a> PrintScope<'a> {
    pub fn enter(view: &'a mut SheetView) -> Self {
        let previous = view.print_mode;
        view.print_mode = true;
        debug!("non-printable elements hidden");
        Self { view, previous }
    }

    pub fn view(&self) -> &SheetView {
        &*self.view
    }
}

impl Drop for PrintScope<'_> {
    fn drop(&mut self) {
        self.view.print_mode = self.previous;
        debug!(print_mode = self.previous, "non-printable elements restored");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failing_render(view: &SheetView) -> anyhow::Result<()> {
        assert!(view.print_mode);
        anyhow::bail!("render failed")
    }

    #[test]
    fn scope_restores_view_on_error_path() {
        let mut view = SheetView::default();
        let result = {
            let scope = PrintScope::enter(&mut view);
            failing_render(scope.view())
        };
        assert!(result.is_err());
        assert!(!view.print_mode);
    }

    #[test]
    fn scope_restores_previous_state() {
        let mut view = SheetView::default();
        {
            let outer = PrintScope::enter(&mut view);
            assert!(outer.view().print_mode);
            drop(outer);
        }
        assert!(!view.print_mode);

        view.print_mode = true;
        {
            let _scope = PrintScope::enter(&mut view);
        }
        assert!(view.print_mode);
    }
}
