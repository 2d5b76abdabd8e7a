pub mod edit;
pub mod product;
pub mod settings;
pub mod totals;
pub mod view_mode;

pub use edit::{ProductEdit, ProductField};
pub use product::{Product, ProductFigures, ProductLine};
pub use settings::DisplaySettings;
pub use totals::SalesTotals;
pub use view_mode::ViewMode;
