pub mod form;
#[cfg(test)]
pub mod impl_fake;
pub mod impl_http;
pub mod interface;
pub mod response;
#[cfg(test)]
mod tests;
