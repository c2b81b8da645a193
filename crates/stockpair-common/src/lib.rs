pub mod dashboard;
pub mod de;
pub mod error;
pub mod figure;
pub mod fs;
pub mod query;
pub mod schema;
pub mod table;

pub use dashboard::{Controls, Dashboard, Session, ShellState};
pub use error::LoadError;
pub use figure::FigureSpec;
pub use query::{filter, FilteredSeries};
pub use schema::{ChartMode, PriceRecord, Selection};
pub use table::PriceTable;
