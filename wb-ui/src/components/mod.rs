//! Gallery UI components

pub mod gallery_grid;
pub mod icons;
pub mod lightbox;
pub mod loadable_image;
pub mod modal;
pub mod navigation_dots;
pub mod scroll_to_top;

pub use gallery_grid::GalleryGrid;
pub use icons::{
    ChevronLeftIcon, ChevronRightIcon, ImageIcon, ImageOffIcon, MenuIcon, RefreshIcon, XIcon,
};
pub use lightbox::Lightbox;
pub use loadable_image::{ImageSkeleton, LoadableImage};
pub use modal::Modal;
pub use navigation_dots::NavigationDots;
pub use scroll_to_top::ScrollToTop;
