//! Database Models
//!
//! One file per collection: the stored document plus its create / update
//! payloads. Update payloads double as merge patches: `None` fields are not
//! serialized and so never overwrite stored values.

pub mod food;
pub mod invoice;
pub mod menu;
pub mod order;
pub mod order_item;
pub mod table;
pub mod user;

// Re-exports
pub use food::{Food, FoodCreate, FoodUpdate};
pub use invoice::{Invoice, InvoiceCreate, InvoiceUpdate, InvoiceView};
pub use menu::{Menu, MenuCreate, MenuUpdate};
pub use order::{Order, OrderCreate, OrderUpdate};
pub use order_item::{
    OrderItem, OrderItemInput, OrderItemUpdate, OrderWithItemsCreate, OrderWithItemsCreated,
};
pub use table::{Table, TableCreate, TableUpdate};
pub use user::{
    LoginRequest, RefreshRequest, SignupRequest, User, UserPage, UserResponse, UserUpdate,
};
