// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page tree plumbing shared by every operation that builds a new document out
// of pages from existing ones: empty document construction, ordered page
// lookup, page copying between documents, crop box access, serialisation.

use std::collections::{HashMap, HashSet};

use lopdf::{Dictionary, Document, Object, ObjectId};
use seitenwerk_core::error::{Result, SeitenwerkError};
use seitenwerk_core::PageBox;
use tracing::warn;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"MediaBox", b"CropBox", b"Resources", b"Rotate"];

/// Guard against malformed page trees whose `/Parent` chain loops.
const MAX_TREE_DEPTH: usize = 64;

/// Create a valid document with an empty page tree.
pub fn new_document(version: &str) -> Document {
    let mut doc = Document::with_version(version);
    let pages_id = doc.new_object_id();

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(Vec::new())),
        ("Count", Object::Integer(0)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]);
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    doc
}

/// Page object ids in reading order.
pub fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

/// Object id of the root `/Pages` node.
pub fn pages_root(doc: &Document) -> Result<ObjectId> {
    let catalog = doc
        .catalog()
        .map_err(|err| SeitenwerkError::Pdf(format!("no catalog: {}", err)))?;
    let pages_ref = catalog
        .get(b"Pages")
        .map_err(|err| SeitenwerkError::Pdf(format!("no /Pages: {}", err)))?;
    match pages_ref {
        Object::Reference(id) => Ok(*id),
        _ => Err(SeitenwerkError::Pdf("/Pages is not a reference".to_string())),
    }
}

/// Append an already-inserted page object to the root page tree.
fn attach_page(target: &mut Document, pages_id: ObjectId, page_id: ObjectId) -> Result<()> {
    let Ok(Object::Dictionary(pages_dict)) = target.get_object_mut(pages_id) else {
        return Err(SeitenwerkError::Pdf(
            "page tree root is not a dictionary".to_string(),
        ));
    };

    match pages_dict.get_mut(b"Kids") {
        Ok(Object::Array(kids)) => kids.push(Object::Reference(page_id)),
        _ => pages_dict.set("Kids", Object::Array(vec![Object::Reference(page_id)])),
    }

    let count = pages_dict
        .get(b"Count")
        .ok()
        .and_then(|c| c.as_i64().ok())
        .unwrap_or(0);
    pages_dict.set("Count", Object::Integer(count + 1));

    if let Ok(Object::Dictionary(page_dict)) = target.get_object_mut(page_id) {
        page_dict.set("Parent", Object::Reference(pages_id));
    }
    Ok(())
}

/// Add a shallow duplicate of a page that already lives in `target`. The
/// duplicate shares content streams and resources with the original.
pub fn duplicate_page(target: &mut Document, page_id: ObjectId) -> Result<ObjectId> {
    let dict = target
        .get_dictionary(page_id)
        .map_err(|err| SeitenwerkError::Pdf(format!("cannot read page {:?}: {}", page_id, err)))?
        .clone();
    let pages_id = pages_root(target)?;
    let new_id = target.add_object(dict);
    attach_page(target, pages_id, new_id)?;
    Ok(new_id)
}

/// Walk up the page tree until `key` is found.
fn inherited_attribute<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut current = doc.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = current.get(key) {
            return Some(value);
        }
        let parent = current.get(b"Parent").ok()?.as_reference().ok()?;
        current = doc.get_dictionary(parent).ok()?;
    }
    None
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> Option<&'a Object> {
    match object {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

fn parse_box(doc: &Document, object: &Object) -> Option<PageBox> {
    let values = resolve(doc, object)?.as_array().ok()?;
    if values.len() != 4 {
        return None;
    }
    let mut coords = [0f32; 4];
    for (slot, value) in coords.iter_mut().zip(values) {
        *slot = match resolve(doc, value)? {
            Object::Integer(n) => *n as f32,
            Object::Real(r) => *r,
            _ => return None,
        };
    }
    Some(PageBox::from_corners(coords[0], coords[1], coords[2], coords[3]))
}

/// Visible region of a page: `/CropBox`, then `/MediaBox` (both looked up
/// through the page tree), then US Letter.
pub fn effective_crop_box(doc: &Document, page_id: ObjectId) -> PageBox {
    [b"CropBox".as_slice(), b"MediaBox".as_slice()]
        .iter()
        .find_map(|key| {
            inherited_attribute(doc, page_id, key).and_then(|value| parse_box(doc, value))
        })
        .unwrap_or(PageBox::LETTER)
}

/// Overwrite the `/CropBox` of a page.
pub fn set_crop_box(doc: &mut Document, page_id: ObjectId, page_box: PageBox) -> Result<()> {
    let dict = doc
        .get_dictionary_mut(page_id)
        .map_err(|err| SeitenwerkError::Pdf(format!("cannot edit page {:?}: {}", page_id, err)))?;
    dict.set(
        "CropBox",
        Object::Array(vec![
            Object::Real(page_box.llx),
            Object::Real(page_box.lly),
            Object::Real(page_box.urx),
            Object::Real(page_box.ury),
        ]),
    );
    Ok(())
}

/// Serialise a document, optionally compressing its streams first.
pub fn to_bytes(doc: &mut Document, compress: bool) -> Result<Vec<u8>> {
    if compress {
        doc.compress();
    }
    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|err| SeitenwerkError::Pdf(format!("failed to serialise PDF: {}", err)))?;
    Ok(output)
}

/// Copies pages from one source document into one target document.
///
/// Objects reachable from copied pages are cloned once per target: pages that
/// share a font or image keep sharing the copy. `/Parent` links are never
/// followed; copied pages are re-parented onto the target's page tree.
///
/// A page may be reached through a plain reference (a link `/Dest`, an
/// annotation `/P`) before it is copied in its own right. Such a clone is
/// completed and attached on its first `copy_page` rather than duplicated.
pub struct PageCopier<'a> {
    source: &'a Document,
    copied: HashMap<ObjectId, ObjectId>,
    /// Source pages already attached to the target page tree.
    attached: HashSet<ObjectId>,
}

impl<'a> PageCopier<'a> {
    pub fn new(source: &'a Document) -> Self {
        Self {
            source,
            copied: HashMap::new(),
            attached: HashSet::new(),
        }
    }

    pub fn source(&self) -> &'a Document {
        self.source
    }

    /// Append page `page_id` of the source to the end of `target`, returning
    /// the id of the new page object.
    ///
    /// Copying the same source page twice yields two page objects sharing
    /// contents and resources.
    pub fn copy_page(&mut self, target: &mut Document, page_id: ObjectId) -> Result<ObjectId> {
        if let Some(&existing) = self.copied.get(&page_id) {
            if self.attached.contains(&page_id) {
                return duplicate_page(target, existing);
            }
            let mut dict = target
                .get_dictionary(existing)
                .map_err(|err| {
                    SeitenwerkError::Pdf(format!("cannot read copied page {:?}: {}", existing, err))
                })?
                .clone();
            self.inherit_attributes(target, page_id, &mut dict);
            return self.attach(target, page_id, existing, dict);
        }

        let source = self.source;
        let page_dict = source.get_dictionary(page_id).map_err(|err| {
            SeitenwerkError::Pdf(format!("cannot read page object {:?}: {}", page_id, err))
        })?;

        // Register before cloning so annotation back-references (/P) land on
        // the new page.
        let new_id = target.new_object_id();
        self.copied.insert(page_id, new_id);

        let mut dict = self.clone_dictionary(target, page_dict);
        self.inherit_attributes(target, page_id, &mut dict);
        self.attach(target, page_id, new_id, dict)
    }

    /// Write inherited attributes the page dictionary lacks onto `dict`.
    fn inherit_attributes(&mut self, target: &mut Document, page_id: ObjectId, dict: &mut Dictionary) {
        let source = self.source;
        for key in INHERITABLE {
            if dict.has(key) {
                continue;
            }
            if let Some(value) = inherited_attribute(source, page_id, key) {
                let cloned = self.clone_object(target, value);
                dict.set(key.to_vec(), cloned);
            }
        }
    }

    fn attach(
        &mut self,
        target: &mut Document,
        page_id: ObjectId,
        new_id: ObjectId,
        dict: Dictionary,
    ) -> Result<ObjectId> {
        target.objects.insert(new_id, Object::Dictionary(dict));
        let pages_id = pages_root(target)?;
        attach_page(target, pages_id, new_id)?;
        self.attached.insert(page_id);
        Ok(new_id)
    }

    fn clone_reference(&mut self, target: &mut Document, id: ObjectId) -> Object {
        if let Some(&mapped) = self.copied.get(&id) {
            return Object::Reference(mapped);
        }
        let source = self.source;
        match source.get_object(id) {
            Ok(referenced) => {
                let new_id = target.new_object_id();
                self.copied.insert(id, new_id);
                let cloned = self.clone_object(target, referenced);
                target.objects.insert(new_id, cloned);
                Object::Reference(new_id)
            }
            Err(err) => {
                warn!(?id, %err, "cannot resolve reference, using Null");
                Object::Null
            }
        }
    }

    fn clone_dictionary(&mut self, target: &mut Document, dict: &Dictionary) -> Dictionary {
        let mut new_dict = Dictionary::new();
        for (key, value) in dict.iter() {
            if key == b"Parent" {
                continue;
            }
            let cloned = self.clone_object(target, value);
            new_dict.set(key.clone(), cloned);
        }
        new_dict
    }

    fn clone_object(&mut self, target: &mut Document, object: &Object) -> Object {
        match object {
            Object::Reference(id) => self.clone_reference(target, *id),
            Object::Dictionary(dict) => Object::Dictionary(self.clone_dictionary(target, dict)),
            Object::Array(items) => Object::Array(
                items
                    .iter()
                    .map(|item| self.clone_object(target, item))
                    .collect(),
            ),
            Object::Stream(stream) => {
                let mut new_stream = stream.clone();
                new_stream.dict = self.clone_dictionary(target, &stream.dict);
                Object::Stream(new_stream)
            }
            other => other.clone(),
        }
    }
}

/// Copy a list of source pages, in order, into a fresh document.
pub fn document_from_pages(
    source: &Document,
    pages: &[ObjectId],
    version: &str,
) -> Result<Document> {
    let mut target = new_document(version);
    let mut copier = PageCopier::new(source);
    for &page_id in pages {
        copier.copy_page(&mut target, page_id)?;
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::testing::{add_link, create_test_pdf, link_target, page_text};

    #[test]
    fn new_document_has_no_pages() {
        let mut doc = new_document("1.5");
        assert_eq!(doc.get_pages().len(), 0);
        let bytes = to_bytes(&mut doc, true).unwrap();
        let reloaded = Document::load_mem(&bytes).unwrap();
        assert_eq!(reloaded.get_pages().len(), 0);
    }

    #[test]
    fn copied_pages_keep_order_and_content() {
        let source = create_test_pdf(3, "src");
        let ids = page_ids(&source);
        let mut copy = document_from_pages(&source, &[ids[2], ids[0]], "1.5").unwrap();

        let bytes = to_bytes(&mut copy, false).unwrap();
        let reloaded = Document::load_mem(&bytes).unwrap();
        assert_eq!(reloaded.get_pages().len(), 2);
        assert_eq!(page_text(&reloaded, 1), "src-Page-3");
        assert_eq!(page_text(&reloaded, 2), "src-Page-1");
    }

    #[test]
    fn inherited_media_box_is_materialised() {
        let source = create_test_pdf(1, "x");
        let page_id = page_ids(&source)[0];
        // Test pages inherit their MediaBox from the /Pages node.
        assert!(!source.get_dictionary(page_id).unwrap().has(b"MediaBox"));

        let copy = document_from_pages(&source, &[page_id], "1.5").unwrap();
        let new_page = page_ids(&copy)[0];
        assert!(copy.get_dictionary(new_page).unwrap().has(b"MediaBox"));
        assert_eq!(effective_crop_box(&copy, new_page), PageBox::LETTER);
    }

    #[test]
    fn crop_box_wins_over_media_box() {
        let mut doc = create_test_pdf(1, "x");
        let page_id = page_ids(&doc)[0];
        let b = PageBox::from_corners(10.0, 20.0, 300.0, 400.0);
        set_crop_box(&mut doc, page_id, b).unwrap();
        assert_eq!(effective_crop_box(&doc, page_id), b);
    }

    #[test]
    fn same_page_twice_shares_contents() {
        let source = create_test_pdf(1, "dup");
        let page_id = page_ids(&source)[0];
        let copy = document_from_pages(&source, &[page_id, page_id], "1.5").unwrap();

        let pages = page_ids(&copy);
        assert_eq!(pages.len(), 2);
        assert_ne!(pages[0], pages[1]);
        let contents_of = |page: ObjectId| {
            copy.get_dictionary(page)
                .unwrap()
                .get(b"Contents")
                .unwrap()
                .as_reference()
                .unwrap()
        };
        assert_eq!(contents_of(pages[0]), contents_of(pages[1]));
    }

    #[test]
    fn shared_resources_are_copied_once() {
        let source = create_test_pdf(2, "font");
        let ids = page_ids(&source);
        let copy = document_from_pages(&source, &ids, "1.5").unwrap();
        let pages = page_ids(&copy);

        let resources_of = |page: ObjectId| {
            copy.get_dictionary(page)
                .unwrap()
                .get(b"Resources")
                .unwrap()
                .as_reference()
                .unwrap()
        };
        assert_eq!(resources_of(pages[0]), resources_of(pages[1]));
    }

    #[test]
    fn forward_linked_page_keeps_inherited_attributes() {
        let mut source = create_test_pdf(3, "toc");
        add_link(&mut source, 1, 3);
        let ids = page_ids(&source);
        let copy = document_from_pages(&source, &ids, "1.5").unwrap();

        let pages = page_ids(&copy);
        assert_eq!(pages.len(), 3);
        let linked = copy.get_dictionary(pages[2]).unwrap();
        assert!(linked.has(b"Resources"));
        assert!(linked.has(b"MediaBox"));
        assert_eq!(page_text(&copy, 3), "toc-Page-3");

        // The link lands on the page in the tree, not on a detached copy.
        assert_eq!(link_target(&copy, 1), pages[2]);
        // Only the annotation itself is added; no orphan page object.
        let plain = create_test_pdf(3, "toc");
        let plain_copy = document_from_pages(&plain, &page_ids(&plain), "1.5").unwrap();
        assert_eq!(copy.objects.len(), plain_copy.objects.len() + 1);
    }

    #[test]
    fn forward_linked_page_copied_twice_is_duplicated_once_attached() {
        let mut source = create_test_pdf(2, "toc");
        add_link(&mut source, 1, 2);
        let ids = page_ids(&source);
        let copy = document_from_pages(&source, &[ids[0], ids[1], ids[1]], "1.5").unwrap();

        let pages = page_ids(&copy);
        assert_eq!(pages.len(), 3);
        assert_eq!(link_target(&copy, 1), pages[1]);
        assert!(copy.get_dictionary(pages[2]).unwrap().has(b"Resources"));
        assert_eq!(page_text(&copy, 3), "toc-Page-2");
    }

    #[test]
    fn crop_box_inherited_from_page_tree_wins_over_media_box() {
        let mut doc = create_test_pdf(1, "x");
        let root = pages_root(&doc).unwrap();
        let inherited = PageBox::from_corners(20.0, 30.0, 500.0, 700.0);
        doc.get_dictionary_mut(root).unwrap().set(
            "CropBox",
            Object::Array(vec![
                Object::Integer(20),
                Object::Integer(30),
                Object::Integer(500),
                Object::Integer(700),
            ]),
        );
        let page_id = page_ids(&doc)[0];
        assert!(!doc.get_dictionary(page_id).unwrap().has(b"CropBox"));
        assert_eq!(effective_crop_box(&doc, page_id), inherited);

        let copy = document_from_pages(&doc, &[page_id], "1.5").unwrap();
        let new_page = page_ids(&copy)[0];
        assert!(copy.get_dictionary(new_page).unwrap().has(b"CropBox"));
        assert_eq!(effective_crop_box(&copy, new_page), inherited);
    }
}
