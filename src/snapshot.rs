use crate::error::SnapshotError;
use crate::types::Side;

const MAGIC: &[u8; 4] = b"OSAV";
const VERSION: u32 = 1;
const HEADER_SIZE: usize = 20;
const NUM_CELLS: usize = 64;
// engine-side flag + current-side code + 64 cells
const PAYLOAD_SIZE: usize = 2 + NUM_CELLS;

/// Saved-game snapshot: everything a session needs to resume.
///
/// The byte layout is a 20-byte header (`OSAV` magic, u32 LE version,
/// u32 LE payload length, u32 LE CRC32 of the payload, u32 reserved)
/// followed by the payload: engine-side flag (0 none / 1 dark /
/// 2 light), current-side code, then 64 row-major cell codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub engine_side: Option<Side>,
    pub current: Side,
    pub cells: [u8; NUM_CELLS],
}

impl GameSnapshot {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut payload = Vec::with_capacity(PAYLOAD_SIZE);
        payload.push(self.engine_side.map_or(0, Side::code));
        payload.push(self.current.code());
        payload.extend_from_slice(&self.cells);

        let crc = crc32fast::hash(&payload);
        let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&VERSION.to_le_bytes());
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out.extend_from_slice(&crc.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&payload);
        out
    }

    /// Decodes and validates a snapshot blob. Every header field and
    /// every payload value is checked before anything is accepted.
    pub fn from_bytes(data: &[u8]) -> Result<Self, SnapshotError> {
        if data.len() < HEADER_SIZE {
            return Err(SnapshotError::TooShort {
                expected: HEADER_SIZE,
                got: data.len(),
            });
        }
        if &data[0..4] != MAGIC {
            return Err(SnapshotError::BadMagic);
        }

        let version = read_u32_le(data, 4);
        if version != VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                expected: VERSION,
                got: version,
            });
        }

        let declared = read_u32_le(data, 8) as usize;
        let expected_crc = read_u32_le(data, 12);
        let payload = &data[HEADER_SIZE..];
        if declared != PAYLOAD_SIZE {
            return Err(SnapshotError::LengthMismatch {
                expected: PAYLOAD_SIZE,
                got: declared,
            });
        }
        if payload.len() != PAYLOAD_SIZE {
            return Err(SnapshotError::LengthMismatch {
                expected: PAYLOAD_SIZE,
                got: payload.len(),
            });
        }

        let actual_crc = crc32fast::hash(payload);
        if actual_crc != expected_crc {
            return Err(SnapshotError::CrcMismatch {
                expected: expected_crc,
                got: actual_crc,
            });
        }

        let engine_side = match payload[0] {
            0 => None,
            code => Some(
                Side::from_code(code).map_err(|_| SnapshotError::InvalidSideCode { code })?,
            ),
        };
        let current = Side::from_code(payload[1])
            .map_err(|_| SnapshotError::InvalidSideCode { code: payload[1] })?;

        let mut cells = [0u8; NUM_CELLS];
        cells.copy_from_slice(&payload[2..]);
        for (index, &value) in cells.iter().enumerate() {
            if value > 2 {
                return Err(SnapshotError::InvalidCell { index, value });
            }
        }

        Ok(Self {
            engine_side,
            current,
            cells,
        })
    }
}

fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&data[offset..offset + 4]);
    u32::from_le_bytes(bytes)
}
