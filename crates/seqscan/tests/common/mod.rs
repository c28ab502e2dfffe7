#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// The classic image-sequence fixture directory.
pub fn fixture_names() -> Vec<String> {
    let mut names = Vec::new();
    for version in ["v001", "v002"] {
        names.extend((1..=10).map(|f| format!("012_vb_110_{version}.{f:04}.png")));
    }
    names.extend(
        [1, 2, 3, 10, 12, 13, 14]
            .iter()
            .map(|f| format!("a.{f:03}.tga")),
    );
    names.push("alpha.txt".into());
    for tile in ["tx_0_ty_0", "tx_0_ty_1", "tx_1_ty_0", "tx_1_ty_1"] {
        names.extend((101..=105).map(|f| format!("bnc01_TinkSO_{tile}.{f:04}.tif")));
    }
    names.extend(["file.01.tif".into(), "file.02.tif".into()]);
    names.push("file.info.03.rgb".into());
    names.extend([1, 2, 4].iter().map(|f| format!("file01.{f:03}.j2k")));
    names.extend((40..=43).map(|f| format!("file01_{f:04}.rgb")));
    names.extend((44..=47).map(|f| format!("file02_{f:04}.rgb")));
    names.extend((1..=4).map(|f| format!("file{f}.03.rgb")));
    for ext in ["jpg", "png"] {
        names.extend((1..=3).map(|f| format!("fileA.{f:04}.{ext}")));
    }
    names.push("file_02.tif".into());
    for prefix in ["z1_001_v1", "z1_002_v1", "z1_002_v2"] {
        names.extend((1..=4).map(|f| format!("{prefix}.{f}.png")));
    }
    names
}

pub fn write_fixture(root: &Path) -> std::io::Result<()> {
    for name in fixture_names() {
        fs::write(root.join(name), b"")?;
    }
    Ok(())
}

pub const DEFAULT_RENDERS: &[&str] = &[
    "012_vb_110_v001.1-10.png",
    "012_vb_110_v002.1-10.png",
    "a.1-14.tga",
    "alpha.txt",
    "bnc01_TinkSO_tx_0_ty_0.101-105.tif",
    "bnc01_TinkSO_tx_0_ty_1.101-105.tif",
    "bnc01_TinkSO_tx_1_ty_0.101-105.tif",
    "bnc01_TinkSO_tx_1_ty_1.101-105.tif",
    "file.1-2.tif",
    "file.info.03.rgb",
    "file01.1-4.j2k",
    "file01_40-43.rgb",
    "file02_44-47.rgb",
    "file1-4.03.rgb",
    "fileA.1-3.jpg",
    "fileA.1-3.png",
    "file_02.tif",
    "z1_001_v1.1-4.png",
    "z1_002_v1.1-4.png",
    "z1_002_v2.1-4.png",
];

pub const LISTING: &str = "  10 012_vb_110_v001.%04d.png [1-10]
  10 012_vb_110_v002.%04d.png [1-10]
   7 a.%03d.tga [1-3, 10, 12-14]
   1 alpha.txt 
   5 bnc01_TinkSO_tx_0_ty_0.%04d.tif [101-105]
   5 bnc01_TinkSO_tx_0_ty_1.%04d.tif [101-105]
   5 bnc01_TinkSO_tx_1_ty_0.%04d.tif [101-105]
   5 bnc01_TinkSO_tx_1_ty_1.%04d.tif [101-105]
   2 file.%02d.tif [1-2]
   1 file.info.03.rgb 
   3 file01.%03d.j2k [1-2, 4]
   4 file01_%04d.rgb [40-43]
   4 file02_%04d.rgb [44-47]
   4 file%d.03.rgb [1-4]
   3 fileA.%04d.jpg [1-3]
   3 fileA.%04d.png [1-3]
   1 file_02.tif 
   4 z1_001_v1.%d.png [1-4]
   4 z1_002_v1.%d.png [1-4]
   4 z1_002_v2.%d.png [1-4]
";
