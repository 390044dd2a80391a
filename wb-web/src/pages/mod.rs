mod gallery;
mod home;
mod layout;
mod not_found;
mod space;

pub use gallery::Gallery;
pub use home::Home;
pub use layout::SiteLayout;
pub use not_found::NotFound;
pub use space::Space;
