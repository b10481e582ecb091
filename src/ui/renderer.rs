//! Top-level rendering coordinator.
//!
//! Rendering is two steps: compute the [`UIViewModel`] from `AppState`, then
//! hand it to the layout in [`components`]. The renderer prints ANSI output to
//! stdout and never clears the screen; Zellij provides a fresh frame.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

/// Renders a precomputed view model.
pub fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let _span = tracing::trace_span!(
        "render",
        rows,
        cols,
        items = vm.display_items.len(),
        overlay = vm.overlay.is_some()
    )
    .entered();

    components::render_layout(vm, theme, cols, rows);
}
