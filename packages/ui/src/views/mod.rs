mod home;
pub use home::HomeView;

mod login;
pub use login::LoginView;

mod register;
pub use register::RegisterView;

mod product_detail;
pub use product_detail::ProductDetailView;

mod create_product;
pub use create_product::CreateProductView;

mod notifications;
pub use notifications::NotificationsView;

mod profile;
pub use profile::ProfileView;

mod not_found;
pub use not_found::NotFoundView;
