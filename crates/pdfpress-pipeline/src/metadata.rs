// PdfPress - Multi-Pass PDF Compression
// Copyright (C) 2025 PdfPress Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.

//! Metadata stripping pass
//!
//! Opens the chosen artifact in the structural document model, clears the
//! document-info dictionary, drops the XMP metadata stream and name-tree
//! references from the catalog, and re-serializes. A strip failure never
//! fails the pipeline: the input is copied verbatim to the output path and
//! a warning is surfaced instead.

use lopdf::{Dictionary, Document, Object};
use std::path::Path;
use tracing::{debug, warn};

/// What the stripping pass actually did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StripOutcome {
    /// Metadata was removed and the document re-serialized
    Stripped,
    /// Stripping failed; the input was copied through unchanged
    CopiedVerbatim {
        /// Warning diagnostic describing the failure
        warning: String,
    },
}

/// Strip document metadata from `input` into `output`.
///
/// Always leaves an output file behind. Returns `Err` only when even the
/// verbatim fallback copy fails.
pub fn strip_metadata(input: &Path, output: &Path) -> std::io::Result<StripOutcome> {
    match try_strip(input, output) {
        Ok(()) => {
            debug!("metadata stripped");
            Ok(StripOutcome::Stripped)
        }
        Err(e) => {
            let warning = format!("metadata removal failed, passing artifact through: {e}");
            warn!(error = %e, "metadata removal failed");
            std::fs::copy(input, output)?;
            Ok(StripOutcome::CopiedVerbatim { warning })
        }
    }
}

fn try_strip(input: &Path, output: &Path) -> Result<(), lopdf::Error> {
    let mut doc = Document::load(input)?;

    // Empty the document-info dictionary rather than dangling the trailer ref.
    if let Ok(info_id) = doc.trailer.get(b"Info").and_then(Object::as_reference) {
        doc.objects.insert(info_id, Object::Dictionary(Dictionary::new()));
    }

    let root_id = doc.trailer.get(b"Root")?.as_reference()?;
    let catalog = doc.get_object_mut(root_id)?.as_dict_mut()?;
    catalog.remove(b"Metadata");
    catalog.remove(b"Names");

    doc.compress();
    doc.save(output)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use lopdf::{dictionary, Stream};
    use std::path::PathBuf;

    fn sample_pdf_with_metadata(dir: &Path) -> PathBuf {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let content = Stream::new(dictionary! {}, b"q 0.5 g 10 10 50 50 re f Q".to_vec());
        let content_id = doc.add_object(content);
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );

        let metadata_id = doc.add_object(Stream::new(
            dictionary! { "Type" => "Metadata", "Subtype" => "XML" },
            b"<x:xmpmeta/>".to_vec(),
        ));
        let names_id = doc.add_object(Object::Dictionary(Dictionary::new()));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
            "Metadata" => metadata_id,
            "Names" => names_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal("confidential report"),
            "Author" => Object::string_literal("someone"),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        let path = dir.join("with_metadata.pdf");
        doc.save(&path).unwrap();
        path
    }

    #[test]
    fn test_strip_clears_info_and_catalog_references() {
        let dir = tempfile::tempdir().unwrap();
        let input = sample_pdf_with_metadata(dir.path());
        let output = dir.path().join("stripped.pdf");

        let outcome = strip_metadata(&input, &output).unwrap();
        assert_eq!(outcome, StripOutcome::Stripped);

        let doc = Document::load(&output).unwrap();
        if let Ok(info_id) = doc.trailer.get(b"Info").and_then(Object::as_reference) {
            let info = doc.get_object(info_id).unwrap().as_dict().unwrap();
            assert!(info.iter().next().is_none(), "info dictionary not empty");
        }
        let root_id = doc.trailer.get(b"Root").unwrap().as_reference().unwrap();
        let catalog = doc.get_object(root_id).unwrap().as_dict().unwrap();
        assert!(catalog.get(b"Metadata").is_err());
        assert!(catalog.get(b"Names").is_err());
    }

    #[test]
    fn test_stripped_document_still_loads() {
        let dir = tempfile::tempdir().unwrap();
        let input = sample_pdf_with_metadata(dir.path());
        let output = dir.path().join("stripped.pdf");

        strip_metadata(&input, &output).unwrap();
        let doc = Document::load(&output).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_failure_copies_input_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("garbage.pdf");
        std::fs::write(&input, b"not a real document").unwrap();
        let output = dir.path().join("out.pdf");

        let outcome = strip_metadata(&input, &output).unwrap();
        match outcome {
            StripOutcome::CopiedVerbatim { warning } => {
                assert!(warning.contains("metadata removal failed"));
            }
            StripOutcome::Stripped => panic!("garbage input must not strip cleanly"),
        }
        assert_eq!(std::fs::read(&output).unwrap(), b"not a real document");
    }
}
