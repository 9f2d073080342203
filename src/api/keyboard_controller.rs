use tracing::{debug, trace};

use crate::interaction::FocusHost;

use super::{ChartModel, DefaultAction, Key};

impl<H: FocusHost> ChartModel<H> {
    /// Key press while the plot (or its application node) has focus.
    pub fn on_svg_key_down(&mut self, key: Key) -> DefaultAction {
        if !key.is_plot_key() {
            return DefaultAction::Allow;
        }
        if self.interactions.get().is_popover_pinned {
            return DefaultAction::Prevent;
        }

        match key {
            Key::ArrowUp => self.move_between_series(-1),
            Key::ArrowDown => self.move_between_series(1),
            Key::ArrowLeft => self.move_within_x_axis(-1),
            Key::ArrowRight => self.move_within_x_axis(1),
            Key::Enter | Key::Space => {
                self.interactions.pin_popover();
                debug!("popover pinned by keyboard");
            }
            Key::Escape | Key::Other => {}
        }
        self.sync_application();
        DefaultAction::Prevent
    }

    /// Key press anywhere in the document; Escape drops every highlight.
    pub fn on_document_key_down(&mut self, key: Key) -> DefaultAction {
        if key == Key::Escape {
            self.interactions.clear_highlight();
            self.interactions.clear_highlighted_legend();
            self.sync_application();
        }
        DefaultAction::Allow
    }

    /// Left/Right: along the highlighted series, or column to column.
    fn move_within_x_axis(&mut self, direction: isize) {
        let state = self.interactions.get();
        let plot = &self.computed.plot;
        let columns = plot.columns_by_x();
        let step = |x: usize| {
            let position = columns.iter().position(|column| *column == x)?;
            Some(columns[circular_index(position, direction, columns.len())])
        };

        if let Some(point) = state.highlighted_point {
            let index = plot.point(point).index;
            let Some(next) = step(index.x).and_then(|x| plot.sx()[index.s].get(x).copied())
            else {
                return;
            };
            trace!(from = index.x, series = index.s, "move within series");
            self.highlight_plot_point(next);
        } else if self.series.len() > 1 {
            if let Some(next) = state.highlighted_x.and_then(step) {
                trace!(to = next, "move between columns");
                self.interactions.highlight_x(next);
            }
        }
    }

    /// Up/Down: through the column in visual order, returning to the whole
    /// column past either end when there are several series.
    fn move_between_series(&mut self, direction: isize) {
        let state = self.interactions.get();
        let plot = &self.computed.plot;

        if let Some(point) = state.highlighted_point {
            let index = plot.point(point).index;
            let column = plot.column(index.x);
            let next = index.y as isize + direction;
            if (0..column.len() as isize).contains(&next) {
                self.highlight_plot_point(column[next as usize]);
            } else if self.series.len() > 1 {
                self.interactions.highlight_x(index.x);
            }
        } else if let Some(x) = state.highlighted_x {
            let column = plot.column(x);
            let target = if direction > 0 {
                column.first()
            } else {
                column.last()
            };
            if let Some(target) = target {
                self.highlight_plot_point(*target);
            }
        }
    }
}

fn circular_index(index: usize, direction: isize, len: usize) -> usize {
    let len = len as isize;
    ((index as isize + direction) % len + len) as usize % len as usize
}

#[cfg(test)]
mod tests {
    use super::circular_index;

    #[test]
    fn circular_index_wraps_both_ways() {
        assert_eq!(circular_index(0, -1, 3), 2);
        assert_eq!(circular_index(2, 1, 3), 0);
        assert_eq!(circular_index(1, 1, 3), 2);
    }
}
