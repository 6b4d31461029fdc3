// ABOUTME: Metadata strategy (Open Graph, author, published date) and PageInfo construction.
// ABOUTME: Every key is looked up independently and defaults to an empty string.

use crate::dom::DocumentSnapshot;
use crate::extractors::fields::{
    document_field, page_description, page_title, AUTHOR, OG_DESCRIPTION, OG_IMAGE, OG_TITLE,
    PUBLISHED_DATE,
};
use crate::result::{Metadata, PageInfo};

pub fn extract_metadata<D: DocumentSnapshot>(doc: &D) -> Metadata {
    Metadata {
        og_title: document_field(doc, OG_TITLE).unwrap_or_default(),
        og_description: document_field(doc, OG_DESCRIPTION).unwrap_or_default(),
        og_image: document_field(doc, OG_IMAGE).unwrap_or_default(),
        author: document_field(doc, AUTHOR).unwrap_or_default(),
        published_date: document_field(doc, PUBLISHED_DATE).unwrap_or_default(),
    }
}

pub fn extract_page_info<D: DocumentSnapshot>(doc: &D) -> PageInfo {
    PageInfo {
        title: page_title(doc).unwrap_or_default(),
        url: doc.url().to_string(),
        description: page_description(doc).unwrap_or_default(),
    }
}
