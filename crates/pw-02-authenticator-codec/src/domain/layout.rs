//! # Assertion Blob Layout
//!
//! ```text
//! offset        size  field
//! 0             32    relying-party id hash       (ignored)
//! 32            1     flags                       (ignored)
//! 33            4     signature counter           (ignored)
//! 37            16    authenticator binding id    (ignored)
//! 53            2     credential id length L      (big-endian)
//! 55            L     credential id
//! 55+L          10    COSE key type/curve prefix  (ignored)
//! 65+L          32    public key X
//! 97+L          3     COSE y-label separator      (ignored)
//! 100+L         32    public key Y
//! ```

/// Length of the relying-party id hash.
pub const RP_ID_HASH_LEN: usize = 32;

/// Length of the flags byte.
pub const FLAGS_LEN: usize = 1;

/// Length of the signature counter.
pub const COUNTER_LEN: usize = 4;

/// Length of the authenticator binding id (AAGUID).
pub const BINDING_ID_LEN: usize = 16;

/// Offset of the 16-bit credential id length.
pub const CREDENTIAL_ID_LENGTH_OFFSET: usize = RP_ID_HASH_LEN + FLAGS_LEN + COUNTER_LEN + BINDING_ID_LEN;

/// Offset of the first credential id byte.
pub const CREDENTIAL_ID_OFFSET: usize = CREDENTIAL_ID_LENGTH_OFFSET + 2;

/// COSE map header for an EC2 P-256 key, up to the X label and byte-string header.
pub const COSE_KEY_PREFIX: [u8; 10] = [0xa5, 0x01, 0x02, 0x03, 0x26, 0x20, 0x01, 0x21, 0x58, 0x20];

/// COSE Y label and byte-string header.
pub const COSE_Y_SEPARATOR: [u8; 3] = [0x22, 0x58, 0x20];

/// Length of one public key coordinate.
pub const COORDINATE_LEN: usize = 32;

/// Bytes following the credential id.
pub const KEY_SECTION_LEN: usize =
    COSE_KEY_PREFIX.len() + COORDINATE_LEN + COSE_Y_SEPARATOR.len() + COORDINATE_LEN;

/// Largest credential id the length prefix can express.
pub const MAX_CREDENTIAL_ID_LEN: usize = u16::MAX as usize;

/// Total blob length for a credential id of `credential_id_len` bytes.
#[must_use]
pub const fn blob_len(credential_id_len: usize) -> usize {
    CREDENTIAL_ID_OFFSET + credential_id_len + KEY_SECTION_LEN
}

/// Offset of X for a credential id of `credential_id_len` bytes.
#[must_use]
pub const fn x_offset(credential_id_len: usize) -> usize {
    CREDENTIAL_ID_OFFSET + credential_id_len + COSE_KEY_PREFIX.len()
}

/// Offset of Y for a credential id of `credential_id_len` bytes.
#[must_use]
pub const fn y_offset(credential_id_len: usize) -> usize {
    x_offset(credential_id_len) + COORDINATE_LEN + COSE_Y_SEPARATOR.len()
}
