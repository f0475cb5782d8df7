mod page;
pub use self::page::Page;

mod app;
pub use self::app::App;
