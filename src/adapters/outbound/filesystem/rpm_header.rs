use crate::errata::domain::PackageIdentity;
use crate::ports::outbound::PackageMetadataReader;
use crate::shared::Result;
use anyhow::Context;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const LEAD_SIZE: usize = 96;
const LEAD_MAGIC: [u8; 4] = [0xed, 0xab, 0xee, 0xdb];
const HEADER_MAGIC: [u8; 3] = [0x8e, 0xad, 0xe8];
const INDEX_ENTRY_SIZE: usize = 16;

// Upper bounds rpm itself enforces on a header
const MAX_HEADER_TAGS: usize = 0xffff;
const MAX_HEADER_DATA: usize = 256 * 1024 * 1024;

const TYPE_INT32: u32 = 4;
const TYPE_STRING: u32 = 6;
const TYPE_STRING_ARRAY: u32 = 8;
const TYPE_I18NSTRING: u32 = 9;

const TAG_NAME: u32 = 1000;
const TAG_VERSION: u32 = 1001;
const TAG_RELEASE: u32 = 1002;
const TAG_EPOCH: u32 = 1003;
const TAG_ARCH: u32 = 1022;

/// RpmHeaderReader adapter reading package identity from RPM files
///
/// Reads the lead, skips the signature header and decodes the NAME,
/// VERSION, RELEASE, EPOCH and ARCH tags of the main header. The payload
/// is never read.
#[derive(Debug, Clone, Copy, Default)]
pub struct RpmHeaderReader;

impl RpmHeaderReader {
    pub fn new() -> Self {
        Self
    }
}

impl PackageMetadataReader for RpmHeaderReader {
    fn read_metadata(&self, path: &Path) -> Result<PackageIdentity> {
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        read_package(&mut BufReader::new(file))
            .with_context(|| format!("{} is not a valid RPM package", path.display()))
    }
}

#[derive(Debug, Clone, Copy)]
struct IndexEntry {
    tag: u32,
    kind: u32,
    offset: usize,
}

#[derive(Debug)]
struct Header {
    entries: Vec<IndexEntry>,
    data: Vec<u8>,
}

impl Header {
    fn entry(&self, tag: u32) -> Option<&IndexEntry> {
        self.entries.iter().find(|e| e.tag == tag)
    }

    fn string(&self, tag: u32) -> Option<String> {
        let entry = self.entry(tag)?;
        if !matches!(entry.kind, TYPE_STRING | TYPE_STRING_ARRAY | TYPE_I18NSTRING) {
            return None;
        }
        let bytes = self.data.get(entry.offset..)?;
        let end = bytes.iter().position(|b| *b == 0)?;
        Some(String::from_utf8_lossy(&bytes[..end]).into_owned())
    }

    fn int32(&self, tag: u32) -> Option<u32> {
        let entry = self.entry(tag)?;
        if entry.kind != TYPE_INT32 {
            return None;
        }
        let bytes = self.data.get(entry.offset..entry.offset + 4)?;
        Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

fn read_u32<R: Read>(reader: &mut R) -> Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

fn read_header<R: Read>(reader: &mut R) -> Result<Header> {
    let mut intro = [0u8; 8];
    reader
        .read_exact(&mut intro)
        .context("Truncated header")?;
    if intro[..3] != HEADER_MAGIC {
        anyhow::bail!("Bad header magic");
    }

    let tags = read_u32(reader)? as usize;
    let data_len = read_u32(reader)? as usize;
    if tags > MAX_HEADER_TAGS || data_len > MAX_HEADER_DATA {
        anyhow::bail!("Header too large ({} tags, {} bytes)", tags, data_len);
    }

    let mut index = vec![0u8; tags * INDEX_ENTRY_SIZE];
    reader.read_exact(&mut index).context("Truncated header index")?;
    let entries = index
        .chunks_exact(INDEX_ENTRY_SIZE)
        .map(|chunk| {
            let field = |i: usize| {
                u32::from_be_bytes([chunk[i], chunk[i + 1], chunk[i + 2], chunk[i + 3]])
            };
            IndexEntry {
                tag: field(0),
                kind: field(4),
                offset: field(8) as usize,
            }
        })
        .collect();

    let mut data = vec![0u8; data_len];
    reader.read_exact(&mut data).context("Truncated header data")?;

    Ok(Header { entries, data })
}

fn read_package<R: Read>(reader: &mut R) -> Result<PackageIdentity> {
    let mut lead = [0u8; LEAD_SIZE];
    reader.read_exact(&mut lead).context("File too short")?;
    if lead[..4] != LEAD_MAGIC {
        anyhow::bail!("Bad lead magic");
    }

    let signature = read_header(reader).context("Invalid signature header")?;
    let padding = (8 - signature.data.len() % 8) % 8;
    let mut pad = vec![0u8; padding];
    reader.read_exact(&mut pad)?;

    let header = read_header(reader).context("Invalid main header")?;
    let tag = |tag: u32, label: &str| {
        header
            .string(tag)
            .ok_or_else(|| anyhow::anyhow!("Missing {} tag", label))
    };

    Ok(PackageIdentity::new(
        tag(TAG_NAME, "NAME")?,
        tag(TAG_VERSION, "VERSION")?,
        tag(TAG_RELEASE, "RELEASE")?,
        header.int32(TAG_EPOCH).map(|epoch| epoch.to_string()),
        tag(TAG_ARCH, "ARCH")?,
    ))
}
