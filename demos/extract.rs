use std::env;
use std::fs::{self, File};

use pkgfmt::Result;
use pkgfmt::formats::{ArchiveHandler, PkgArchive};

fn main() -> Result<()> {
    let path = env::args().nth(1).expect("usage: extract <pkg-file>");
    let out_dir = env::args().nth(2).unwrap_or_else(|| "out".to_string());

    let file = File::open(&path)?;
    let mut archive = PkgArchive::open(file)?;

    fs::create_dir_all(&out_dir)?;
    for i in 0..archive.items().len() {
        let item = archive.items()[i].clone();
        if item.is_dir {
            continue;
        }
        let data = archive.extract(i)?;
        let dest = format!("{out_dir}/{}", item.path.replace('/', "_"));
        fs::write(&dest, &data)?;
        println!("{} ({} bytes)", item.path, data.len());
    }

    Ok(())
}
