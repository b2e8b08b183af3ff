pub mod exchange_panel;
pub mod grid_view;
pub mod legend;
pub mod rank_editor;

pub use exchange_panel::{ExchangeAction, ExchangePanel};
pub use legend::{Legend, LegendAction};
