use std::{fs, io::Write};

use camino::{Utf8Path, Utf8PathBuf};
use cbz::{Archive, ArchiveRead, Container, Error, Unrar};
use zip::{write::FileOptions, ZipWriter};

fn write_zip(path: &Utf8Path, entries: &[(&str, &str)]) {
    let mut writer = ZipWriter::new(fs::File::create(path).unwrap());
    for (name, content) in entries {
        writer.start_file(*name, FileOptions::default()).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
}

fn utf8_tempdir() -> (tempfile::TempDir, Utf8PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();

    (dir, path)
}

#[test]
fn mislabeled_zip_falls_back_to_zip() {
    let (_dir, root) = utf8_tempdir();
    let archive = root.join("Mislabeled 01.cbr");
    write_zip(&archive, &[("02.png", "second"), ("01.jpg", "first")]);

    // The zip probe never needs UnRAR
    let unrar = Unrar::new(root.join("no-unrar-here"));
    let (container, mut reader) = Container::probe(&archive, &unrar).unwrap();

    assert_eq!(container, Container::Zip);
    assert_eq!(reader.first_page_name().as_deref(), Some("01.jpg"));
    assert_eq!(&reader.read_by_name("01.jpg").unwrap()[..], b"first");
}

#[test]
fn neither_rar_nor_zip() {
    let (_dir, root) = utf8_tempdir();
    let archive = root.join("broken.cbr");
    fs::write(&archive, b"this is not an archive at all").unwrap();

    let unrar = Unrar::new(root.join("no-unrar-here"));
    assert!(matches!(
        Container::probe(&archive, &unrar),
        Err(Error::NotAnArchive(path)) if path == archive
    ));
}

/// Stands in for UnRAR: the entries of `<archive>` are the files of the `<archive>.pages` directory
#[cfg(unix)]
fn fake_unrar(dir: &Utf8Path) -> Unrar {
    use std::os::unix::fs::PermissionsExt;

    let program = dir.join("unrar");
    fs::write(
        &program,
        r#"#!/bin/sh
command="$1"
for arg; do archive="$entry"; entry="$arg"; done
case "$command" in
    lb) ls -1 "$entry.pages" ;;
    p) cat "$archive.pages/$entry" ;;
    *) exit 7 ;;
esac
"#,
    )
    .unwrap();
    fs::set_permissions(&program, fs::Permissions::from_mode(0o755)).unwrap();

    Unrar::new(program)
}

#[cfg(unix)]
#[test]
fn rar_archives_are_read_through_unrar() {
    let (_dir, root) = utf8_tempdir();
    let unrar = fake_unrar(&root);

    let archive = root.join("Real 01.cbr");
    fs::write(&archive, b"Rar!\x1a\x07\x01\x00 rar5 body").unwrap();
    let pages = root.join("Real 01.cbr.pages");
    fs::create_dir(&pages).unwrap();
    fs::write(pages.join("p002.png"), b"two").unwrap();
    fs::write(pages.join("P001.jpg"), b"one").unwrap();
    fs::write(pages.join("info.txt"), b"meta").unwrap();

    let (container, mut reader) = Container::probe(&archive, &unrar).unwrap();

    assert_eq!(container, Container::Rar);
    assert_eq!(reader.len(), 3);
    assert_eq!(reader.page_names(), vec!["P001.jpg", "p002.png"]);
    assert_eq!(reader.first_page_name().as_deref(), Some("P001.jpg"));
    assert_eq!(&reader.read_by_name("P001.jpg").unwrap()[..], b"one");
    assert!(matches!(
        reader.read_by_name("missing.jpg"),
        Err(Error::EntryNotFound(_))
    ));
}
