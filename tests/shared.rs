use std::sync::Arc;
use std::thread;

mod common;

use chainfs::*;
use common::{init_logger, payload};

#[test]
fn test_shared_appends() {
    init_logger();
    let fs = FileSystem::new(Arc::new(RamDisk::new())).into_shared();
    let files: Vec<FileId> = (0..4).map(|_| fs.lock().create_file().unwrap()).collect();
    assert_eq!(files, vec![0, 1, 2, 3]);

    let handles: Vec<_> = files
        .iter()
        .map(|&file| {
            let fs = Arc::clone(&fs);
            thread::spawn(move || {
                for _ in 0..20 {
                    fs.lock().append(file, &payload(file)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let mut fs = fs.lock();
    let mut all_sectors = Vec::new();
    let mut buf = [0u8; SECTOR_SIZE];
    for &file in &files {
        assert_eq!(fs.file_size(file).unwrap(), 20);
        for loc in 0..20 {
            fs.read(file, loc, &mut buf).unwrap();
            assert_eq!(buf, payload(file));
        }
        all_sectors.extend(fs.file_sectors(file).unwrap());
    }
    all_sectors.sort_unstable();
    all_sectors.dedup();
    assert_eq!(all_sectors.len(), 80);
    assert_eq!(fs.free_sectors().unwrap(), NUM_DATA_SECTORS - 80);
    fs.flush().unwrap();
    log!("{}", fs.dump());
}
