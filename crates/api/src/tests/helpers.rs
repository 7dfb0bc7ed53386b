// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::io::{Cursor, Write};

use earthen_persistence::Persistence;
use zip::ZipWriter;
use zip::write::FileOptions;

pub const TEST_LOGIN: &str = "potter";
pub const TEST_PASSWORD: &str = "Glaze&Kiln2026";

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// An in-memory database with one admin operator.
pub fn create_persistence_with_operator() -> (Persistence, i64) {
    let mut persistence: Persistence = create_test_persistence();
    let operator_id: i64 = persistence
        .create_operator(TEST_LOGIN, "Studio Potter", TEST_PASSWORD)
        .expect("Failed to create operator");
    (persistence, operator_id)
}

/// Wraps WordprocessingML paragraphs in a minimal `.docx` archive.
pub fn build_docx(paragraphs: &str) -> Vec<u8> {
    let document: String = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{paragraphs}<w:sectPr/></w:body></w:document>"#
    );
    build_zip(&[
        ("[Content_Types].xml", "<Types/>"),
        ("word/document.xml", &document),
    ])
}

pub fn build_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer: ZipWriter<Cursor<Vec<u8>>> = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents) in entries {
        writer
            .start_file(*name, FileOptions::default())
            .expect("Failed to start zip entry");
        writer
            .write_all(contents.as_bytes())
            .expect("Failed to write zip entry");
    }
    writer.finish().expect("Failed to finish zip").into_inner()
}
