pub mod html;
pub mod sitemap;

#[cfg(test)]
mod tests;
