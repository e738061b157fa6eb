use crate::error::RenderError;
use crate::renderer::{Attribute, PageRenderer};

/// Reads the `href` of every anchor on the current page, in DOM order.
///
/// Anchors invalidated between enumeration and read are skipped. Duplicates
/// are kept.
pub async fn extract_links<R>(renderer: &mut R) -> Result<Vec<String>, RenderError>
where
    R: PageRenderer + ?Sized,
{
    ::log::debug!("Extracting links from the page.");
    let anchors = renderer.anchors().await?;
    let mut hrefs = Vec::with_capacity(anchors.len());

    for anchor in &anchors {
        match renderer.read_href(anchor).await? {
            Attribute::Present(href) if !href.is_empty() => hrefs.push(href),
            Attribute::Present(_) | Attribute::Missing => {}
            Attribute::Stale => {
                ::log::debug!("Encountered a stale element. Skipping this element.");
            }
        }
    }

    ::log::debug!("Extracted {} links.", hrefs.len());
    Ok(hrefs)
}
