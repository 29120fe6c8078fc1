//! End-to-end tests: build packages from a fake installation, install them
//! into an empty destination, and compare trees.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use pacchetto::builder::{PackageBuilder, PackageOptions};
use pacchetto::installer::PackageInstaller;
use pacchetto::locator::{FixedLayoutStrategy, InstallationLocator};
use pacchetto::{ContentCategory, CopyMode, InstallationPath, Layout, PackageMode, PacchettoError};
use tempfile::TempDir;

/// Relative path -> file bytes for every file beneath `root`.
fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
            (rel, fs::read(e.path()).unwrap())
        })
        .collect()
}

/// A small installation with server files and three content categories.
fn fake_install(root: &Path) -> InstallationPath {
    let server = root.join("server");
    fs::create_dir_all(server.join("cfg")).unwrap();
    fs::create_dir_all(server.join("system/data")).unwrap();
    fs::write(server.join("acServer"), [0x7fu8, b'E', b'L', b'F', 0, 1, 2]).unwrap();
    fs::write(server.join("cfg/server_cfg.ini"), "[SERVER]\nNAME=Test\n").unwrap();
    fs::write(server.join("cfg/entry_list.ini"), "[CAR_0]\n").unwrap();
    fs::write(server.join("system/data/surfaces.ini"), "[SURFACE_0]\n").unwrap();

    let items = [
        (ContentCategory::Tracks, "magione"),
        (ContentCategory::Cars, "abarth500"),
        (ContentCategory::Weather, "1_heavy_fog"),
    ];
    for (category, item) in items {
        let dir = root.join("content").join(category.dir_name()).join(item);
        fs::create_dir_all(dir.join("data")).unwrap();
        fs::create_dir_all(dir.join("ui")).unwrap();
        fs::write(dir.join("data/config.ini"), format!("[{}]\n", item)).unwrap();
        fs::write(dir.join("data.acd"), vec![item.len() as u8; 64]).unwrap();
        fs::write(dir.join("ui/preview.png"), b"\x89PNG").unwrap();
        fs::write(dir.join("ui/readme.txt"), "docs").unwrap();
    }

    InstallationPath::new(root)
}

#[test]
fn phat_roundtrip_reproduces_server_tree() {
    let temp = TempDir::new().unwrap();
    let install = fake_install(&temp.path().join("assettocorsa"));
    let out = temp.path().join("out");

    let archive = PackageBuilder::default()
        .create_phat_package(&install, &out, Some(temp.path()), CopyMode::Full)
        .unwrap();

    let dest = temp.path().join("server-install");
    let result = PackageInstaller::default()
        .install_monolithic(&archive, &dest)
        .unwrap();

    let installed = snapshot(&result.server_dir);
    for (rel, bytes) in snapshot(&install.as_path().join("server")) {
        assert_eq!(installed.get(&rel), Some(&bytes), "mismatch for {:?}", rel);
    }
    for category in ContentCategory::ALL {
        let original = snapshot(&install.as_path().join("content").join(category.dir_name()));
        let extracted = snapshot(&result.server_dir.join("content").join(category.dir_name()));
        assert_eq!(original, extracted, "category {}", category);
    }
}

#[test]
fn phat_selective_package_keeps_only_ini_and_acd() {
    let temp = TempDir::new().unwrap();
    let install = fake_install(&temp.path().join("assettocorsa"));
    let out = temp.path().join("out");

    let archive = PackageBuilder::default()
        .create_phat_package(&install, &out, Some(temp.path()), CopyMode::Selective)
        .unwrap();
    let dest = temp.path().join("server-install");
    PackageInstaller::default()
        .install_monolithic(&archive, &dest)
        .unwrap();

    let tracks = snapshot(&dest.join("server/content/tracks"));
    let names: Vec<PathBuf> = tracks.keys().cloned().collect();
    assert_eq!(
        names,
        vec![
            PathBuf::from("magione/data/config.ini"),
            PathBuf::from("magione/data.acd"),
        ]
    );
    assert!(!dest.join("server/content/tracks/magione/ui").exists());
    // Server files are never filtered.
    assert!(dest.join("server/acServer").is_file());
}

#[test]
fn phat_build_twice_overwrites_archive() {
    let temp = TempDir::new().unwrap();
    let install = fake_install(&temp.path().join("assettocorsa"));
    let out = temp.path().join("out");
    let builder = PackageBuilder::default();

    let first = builder
        .create_phat_package(&install, &out, Some(temp.path()), CopyMode::Selective)
        .unwrap();
    let first_bytes = fs::read(&first).unwrap();
    let second = builder
        .create_phat_package(&install, &out, Some(temp.path()), CopyMode::Selective)
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), first_bytes);
    assert_eq!(fs::read_dir(&out).unwrap().count(), 1);

    let once = temp.path().join("once");
    PackageInstaller::default()
        .install_monolithic(&second, &once)
        .unwrap();
    assert_eq!(
        snapshot(&once).len(),
        snapshot(&install.as_path().join("server")).len() + 3 * 2
    );
}

#[test]
fn distributed_roundtrip_reproduces_categories() {
    let temp = TempDir::new().unwrap();
    let install = fake_install(&temp.path().join("assettocorsa"));
    let out = temp.path().join("out");

    let package_dir = PackageBuilder::default()
        .create_package(
            &install,
            &PackageOptions::new(&out).with_mode(PackageMode::Distributed),
        )
        .unwrap();

    let dest = temp.path().join("server-install");
    let result = PackageInstaller::default()
        .install(PackageMode::Distributed, &package_dir, &dest)
        .unwrap();

    assert_eq!(result.archives_extracted, 4);
    assert_eq!(
        snapshot(&install.as_path().join("server")),
        snapshot(&dest.join("server"))
            .into_iter()
            .filter(|(rel, _)| !rel.starts_with("content"))
            .collect::<BTreeMap<_, _>>()
    );
    for category in ContentCategory::ALL {
        assert_eq!(
            snapshot(&install.as_path().join("content").join(category.dir_name())),
            snapshot(&dest.join("server/content").join(category.dir_name())),
            "category {}",
            category
        );
    }
}

#[test]
fn distributed_missing_weather_leaves_earlier_archives() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("assettocorsa");
    let install = fake_install(&root);
    fs::remove_dir_all(root.join("content/weather")).unwrap();
    let out = temp.path().join("out");

    let err = PackageBuilder::default()
        .build_distributed(&install, &out)
        .unwrap_err();

    assert!(matches!(err, PacchettoError::ContentMissing(ref c) if c == "weather"));
    let package_dir = out.join("assetto-corsa-server");
    assert!(package_dir.join("server.zip").exists());
    assert!(!package_dir.join("content/weather.zip").exists());

    // The partial set cannot be installed.
    let install_err = PackageInstaller::default()
        .install_distributed(&package_dir, &temp.path().join("dest"))
        .unwrap_err();
    assert!(matches!(install_err, PacchettoError::PackageMissing(ref c) if c == "weather"));
}

#[test]
fn locate_then_package() {
    let temp = TempDir::new().unwrap();
    let layout = Layout::default();
    let home = temp.path().join("home");
    fake_install(&home.join(&layout.fixed_install_suffix));

    let locator =
        InstallationLocator::new(Box::new(FixedLayoutStrategy::new(&home, &layout)));
    let install = locator.locate().unwrap();

    let archive = PackageBuilder::new(layout)
        .create_phat_package(
            &install,
            &home.join("Desktop"),
            None,
            CopyMode::Selective,
        )
        .unwrap();
    assert_eq!(
        archive,
        home.join("Desktop").join("assetto-corsa-server.zip")
    );
}
