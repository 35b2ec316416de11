#![recursion_limit = "256"]

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use bookmarks_core::{
    export, load, read_text, save_db, BookmarkRow, CodecError, Config, ConvertError, Converter,
    Dialect, Folder, Format, Output, SpecialFolder, StorageError,
};

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn generic_json() -> Value {
    json!({
        "id": 1, "guid": "a8b6cce8-7bee-4840-ad9a-7c4684054e57", "index": 0, "title": "root",
        "date_added": 1659184459000000_i64, "date_modified": 0, "type": "folder",
        "special_folder": "root",
        "children": [
            {
                "id": 2, "guid": "c4d6c7cd-5228-4d45-9317-7913b134ba38", "index": 0,
                "title": "Bookmarks Menu", "date_added": 1659184459000000_i64,
                "date_modified": 1659184460000000_i64, "type": "folder", "special_folder": "menu",
                "children": [
                    {"id": 5, "guid": "0f6c3c3a-6c50-4bb4-9d38-2b2b7d4e6a11", "index": 0,
                     "title": "Fish & <Chips>", "date_added": 1659184461000000_i64,
                     "date_modified": 0, "url": "https://a.example/?q=1&r=2",
                     "icon": "data:image/png;base64,AAAA", "iconuri": "https://a.example/favicon.ico",
                     "tags": ["food", "uk"], "type": "url"}
                ]
            },
            {
                "id": 3, "guid": "6d7a4a8e-1c2b-4f5e-8a9b-0c1d2e3f4a5b", "index": 1,
                "title": "Bookmarks Toolbar", "date_added": 1659184459000000_i64,
                "date_modified": 0, "type": "folder", "special_folder": "toolbar",
                "children": [
                    {"id": 6, "guid": "3e2d1c0b-9a8f-4e7d-8c6b-5a4f3e2d1c0b", "index": 0,
                     "title": "nested", "date_added": 1659184462000000_i64,
                     "date_modified": 1659184463000000_i64, "type": "folder",
                     "children": [
                         {"id": 7, "guid": "9b8a7c6d-5e4f-4a3b-9c2d-1e0f9a8b7c6d", "index": 0,
                          "title": "deep", "date_added": 1659184464000000_i64,
                          "date_modified": 0, "url": "https://deep.example/",
                          "icon": "", "iconuri": "", "tags": [], "type": "url"}
                     ]}
                ]
            },
            {
                "id": 4, "guid": "1a2b3c4d-5e6f-4a7b-8c9d-0e1f2a3b4c5d", "index": 2,
                "title": "Other Bookmarks", "date_added": 1659184459000000_i64,
                "date_modified": 0, "type": "folder", "special_folder": "other",
                "children": []
            }
        ]
    })
}

fn assert_same_children(a: &Folder, b: &Folder, tag: SpecialFolder) {
    let left = a.special_child(tag).unwrap();
    let right = b.special_child(tag).unwrap();
    assert_eq!(left.children.len(), right.children.len(), "{tag}");
    for (x, y) in left.iter().zip(right.iter()) {
        assert!(x.same_content(y), "{tag}: {x:?} != {y:?}");
    }
}

#[test]
fn test_generic_json_round_trip_through_files() {
    let dir = TempDir::new().unwrap();
    let source = serde_json::to_string_pretty(&generic_json()).unwrap();
    let input = write(&dir, "in.json", &source);
    let output = dir.path().join("out/again.json");

    let mut converter = Converter::new(&input);
    let saved = converter.run(Format::Json, Format::Json, Some(output.as_path())).unwrap();

    assert_eq!(saved, output);
    assert_eq!(read_text(&output).unwrap(), source);
}

#[test]
fn test_generic_json_db_round_trip() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "in.json", &generic_json().to_string());
    let db_path = dir.path().join("bookmarks.db");

    let mut to_db = Converter::new(&input);
    to_db.run(Format::Json, Format::Db, Some(db_path.as_path())).unwrap();

    let mut from_db = Converter::new(&db_path);
    from_db.parse(Format::Db).unwrap();
    from_db.convert(Format::Json).unwrap();

    match from_db.output() {
        Some(Output::Json(value)) => assert_eq!(value, &generic_json()),
        other => panic!("expected json output, got {other:?}"),
    }
    assert_eq!(from_db.tree(), to_db.tree());
}

#[test]
fn test_generic_html_round_trip_keeps_content() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "in.json", &generic_json().to_string());
    let html_path = dir.path().join("bookmarks.html");

    let tree = load(Dialect::Generic, Format::Json, &input).unwrap();
    export(Dialect::Generic, Format::Html, &tree)
        .unwrap()
        .save(&html_path, &Config::default())
        .unwrap();

    let html = read_text(&html_path).unwrap();
    assert!(html.contains(">Fish &amp; &lt;Chips&gt;</A>"));
    assert!(html.contains("HREF=\"https://a.example/?q=1&r=2\""));

    let reloaded = load(Dialect::Generic, Format::Html, &html_path).unwrap();
    for tag in [SpecialFolder::Menu, SpecialFolder::Toolbar, SpecialFolder::Other] {
        assert_same_children(&tree, &reloaded, tag);
    }

    let ids: Vec<i64> = reloaded.walk().map(|b| b.id()).collect();
    assert_eq!(ids, vec![2, 3, 4, 5, 6, 7]);
}

#[test]
fn test_chrome_json_to_firefox_json() {
    let dir = TempDir::new().unwrap();
    let chrome = json!({
        "checksum": "0123456789abcdef",
        "roots": {
            "bookmark_bar": {
                "children": [
                    {"date_added": "13303658061000000", "date_last_used": "0",
                     "guid": "0f6c3c3a-6c50-4bb4-9d38-2b2b7d4e6a11", "id": "4",
                     "name": "a", "type": "url", "url": "https://a.example/"}
                ],
                "date_added": "13303658059000000", "date_last_used": "0",
                "date_modified": "0", "guid": "0bc5d13f-2cba-5d74-951f-3f233fe6c908",
                "id": "1", "name": "Bookmarks bar", "type": "folder"
            },
            "other": {
                "children": [], "date_added": "13303658059000000", "date_last_used": "0",
                "date_modified": "0", "guid": "82b081ec-3dd3-529c-8475-ab6c344590dd",
                "id": "2", "name": "Other bookmarks", "type": "folder"
            },
            "synced": {
                "children": [], "date_added": "13303658059000000", "date_last_used": "0",
                "date_modified": "0", "guid": "4cf2e351-0e85-532b-bb37-df045d8f8d0f",
                "id": "3", "name": "Mobile bookmarks", "type": "folder"
            }
        },
        "version": 1
    });
    let input = write(&dir, "Bookmarks", &chrome.to_string());
    let output = dir.path().join("places.json");

    let mut converter = Converter::new(&input)
        .from_dialect(Dialect::Chrome)
        .to_dialect(Dialect::Firefox);
    converter.run(Format::Json, Format::Json, Some(output.as_path())).unwrap();

    let firefox: Value = serde_json::from_str(&read_text(&output).unwrap()).unwrap();
    assert_eq!(firefox["root"], "placesRoot");
    assert_eq!(firefox["guid"], "root________");

    let roots: Vec<&str> = firefox["children"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["root"].as_str().unwrap())
        .collect();
    assert_eq!(roots, vec!["toolbarFolder", "unfiledBookmarksFolder", "mobileFolder"]);

    let link = &firefox["children"][0]["children"][0];
    assert_eq!(link["uri"], "https://a.example/");
    assert_eq!(link["dateAdded"], 1659184461000000_i64);
    assert_eq!(link["id"], 5);
    assert_eq!(link["guid"].as_str().unwrap().len(), 12);
}

#[test]
fn test_firefox_html_to_chrome_html() {
    let dir = TempDir::new().unwrap();
    let html = r#"<!DOCTYPE NETSCAPE-Bookmark-file-1>
<!-- This is an automatically generated file.
     It will be read and overwritten.
     DO NOT EDIT! -->
<META HTTP-EQUIV="Content-Type" CONTENT="text/html; charset=UTF-8">
<TITLE>Bookmarks</TITLE>
<H1>Bookmarks Menu</H1>

<DL><p>
    <DT><A HREF="https://menu.example/" ADD_DATE="1659184461">menu link</A>
    <DT><H3 ADD_DATE="1659184459" LAST_MODIFIED="1659184460" PERSONAL_TOOLBAR_FOLDER="true">Bookmarks Toolbar</H3>
    <DL><p>
        <DT><A HREF="https://bar.example/" ADD_DATE="1659184462" ICON="data:x">bar link</A>
    </DL><p>
    <DT><H3 ADD_DATE="1659184459" LAST_MODIFIED="0" UNFILED_BOOKMARKS_FOLDER="true">Other Bookmarks</H3>
    <DL><p>
        <DT><A HREF="https://other.example/" ADD_DATE="1659184463">other link</A>
    </DL><p>
</DL>
"#;
    let input = write(&dir, "firefox.html", html);

    let tree = load(Dialect::Firefox, Format::Html, &input).unwrap();
    let output = export(Dialect::Chrome, Format::Html, &tree).unwrap();

    let Output::Html(chrome) = output else {
        panic!("expected html output");
    };
    let body: Vec<&str> = chrome.lines().skip_while(|l| *l != "<DL><p>").collect();
    assert_eq!(
        body,
        vec![
            "<DL><p>",
            "    <DT><H3 ADD_DATE=\"1659184459\" LAST_MODIFIED=\"1659184460\" PERSONAL_TOOLBAR_FOLDER=\"true\">Bookmarks bar</H3>",
            "    <DL><p>",
            "        <DT><A HREF=\"https://bar.example/\" ADD_DATE=\"1659184462\" ICON=\"data:x\">bar link</A>",
            "    </DL><p>",
            "    <DT><A HREF=\"https://other.example/\" ADD_DATE=\"1659184463\">other link</A>",
            "</DL><p>",
        ]
    );
}

#[test]
fn test_generic_html_mobile_flag() {
    let dir = TempDir::new().unwrap();
    let html = r#"<!DOCTYPE NETSCAPE-Bookmark-file-1>
<META HTTP-EQUIV="Content-Type" CONTENT="text/html; charset=UTF-8">
<TITLE>Bookmarks</TITLE>
<H1>Bookmarks Menu</H1>

<DL><p>
    <DT><A HREF="https://menu.example/" ADD_DATE="1659184461">menu link</A>
    <DT><H3 ADD_DATE="1659184459" LAST_MODIFIED="1659184460" MOBILE_BOOKMARKS_FOLDER="true">Phone</H3>
    <DL><p>
        <DT><A HREF="https://phone.example/" ADD_DATE="1659184462">phone link</A>
    </DL><p>
</DL>
"#;
    let input = write(&dir, "generic.html", html);

    let tree = load(Dialect::Generic, Format::Html, &input).unwrap();
    let mobile = tree.special_child(SpecialFolder::Mobile).unwrap();
    assert_eq!(mobile.title, "Mobile Bookmarks");
    assert_eq!(mobile.date_added, 1659184459000000);
    assert_eq!(mobile.children[0].title(), "phone link");

    let menu = tree.special_child(SpecialFolder::Menu).unwrap();
    assert_eq!(menu.children.len(), 1);
    assert_eq!(menu.children[0].title(), "menu link");

    let Output::Json(value) = export(Dialect::Generic, Format::Json, &tree).unwrap() else {
        panic!("expected json output");
    };
    assert_eq!(value["children"][1]["special_folder"], "mobile");
    assert_eq!(value["children"][1]["title"], "Mobile Bookmarks");
}

#[test]
fn test_db_without_root_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rootless.db");
    let orphan = BookmarkRow {
        id: 1,
        guid: "a8b6cce8-7bee-4840-ad9a-7c4684054e57".to_string(),
        title: "orphan".to_string(),
        row_type: "folder".to_string(),
        ..Default::default()
    };
    save_db(&path, &[orphan]).unwrap();

    let err = load(Dialect::Generic, Format::Db, &path).unwrap_err();
    assert!(
        matches!(
            err,
            ConvertError::Codec(CodecError::Storage(StorageError::RootNotFound))
        ),
        "{err}"
    );
    assert!(err.is_invalid_bookmarks());
    assert!(!err.is_invalid_database());
}

#[test]
fn test_special_folders_stay_unique() {
    let dir = TempDir::new().unwrap();
    let mut doc = generic_json();
    doc["children"][1]["children"][0]["special_folder"] = json!("menu");
    let input = write(&dir, "dupes.json", &doc.to_string());

    let tree = load(Dialect::Generic, Format::Json, &input).unwrap();
    let menus = tree
        .walk()
        .filter(|b| b.special_folder() == Some(SpecialFolder::Menu))
        .count();
    assert_eq!(menus, 1);
    assert_eq!(tree.special_child(SpecialFolder::Menu).map(|f| f.id), Some(2));
}

#[test]
fn test_invalid_inputs() {
    let dir = TempDir::new().unwrap();

    let not_db = write(&dir, "fake.db", &"not a sqlite database header\n".repeat(16));
    let err = load(Dialect::Generic, Format::Db, &not_db).unwrap_err();
    assert!(err.is_invalid_database(), "{err}");

    let bad_json = write(&dir, "bad.json", "{\"id\": 1,");
    let err = load(Dialect::Generic, Format::Json, &bad_json).unwrap_err();
    assert!(err.is_invalid_bookmarks(), "{err}");

    let unknown = write(
        &dir,
        "unknown.json",
        r#"{"id": 1, "index": 0, "type": "folder", "children": [{"id": 2, "index": 0, "type": "link"}]}"#,
    );
    let err = load(Dialect::Generic, Format::Json, &unknown).unwrap_err();
    assert!(err.is_invalid_bookmarks(), "{err}");

    let no_html = write(&dir, "empty.html", "<html><body>nothing here</body></html>");
    let err = load(Dialect::Chrome, Format::Html, &no_html).unwrap_err();
    assert!(err.is_invalid_bookmarks(), "{err}");

    let err = load(Dialect::Chrome, Format::Db, Path::new("missing.db")).unwrap_err();
    assert!(matches!(err, ConvertError::Codec(_)));
    assert!(!err.is_invalid_bookmarks());
}
