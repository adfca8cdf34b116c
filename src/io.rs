// io.rs - 输入输出文件句柄（按扩展名自动处理 gzip）

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::Result;

fn is_gzip(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("gz")
}

pub fn open_reader(path: &Path) -> Result<Box<dyn BufRead + Send>> {
    let file = File::open(path)?;

    if is_gzip(path) {
        let decoder = MultiGzDecoder::new(file);
        // 增加缓冲区到2MB
        Ok(Box::new(BufReader::with_capacity(2 << 20, decoder)))
    } else {
        Ok(Box::new(BufReader::with_capacity(2 << 20, file)))
    }
}

/// Open an output file, gzip-compressed at `level` when the path ends in `.gz`.
pub fn create_writer(path: &Path, level: u32) -> Result<Box<dyn Write + Send>> {
    let file = File::create(path)?;

    if is_gzip(path) {
        // 低压缩等级换速度
        let encoder = GzEncoder::new(file, Compression::new(level));
        // 更大的 BufWriter，减少 sys-call 次数
        Ok(Box::new(BufWriter::with_capacity(4 << 20, encoder)))
    } else {
        Ok(Box::new(BufWriter::with_capacity(4 << 20, file)))
    }
}
