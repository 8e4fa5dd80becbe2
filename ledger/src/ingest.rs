//! Recipient ingestion from `address,amount` CSV snapshots.
//!
//! The first row is a header and is skipped. Addresses may carry any bech32
//! prefix; they are re-encoded under the canonical account prefix and must
//! carry a 20 or 32 byte account. Rows with a zero (or empty) amount are
//! dropped after both fields are checked.

use crate::error::GenesisError;
use genesis_crypto::{convert_prefix, validate_account_address};
use genesis_types::{AccountAddress, Amount};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One non-zero row of a snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecipientRecord {
    pub address: AccountAddress,
    pub amount: Amount,
    /// Position in the source file; the header is row 0.
    pub row_index: usize,
}

/// Parse a snapshot, preserving row order.
pub fn read_recipients<R: Read>(
    reader: R,
    prefix: &str,
) -> Result<Vec<RecipientRecord>, GenesisError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (i, row) in csv_reader.records().enumerate() {
        let row = row?;
        let row_index = i + 1;

        let raw_address = row.get(0).ok_or(GenesisError::MissingField {
            row: row_index,
            field: "address",
        })?;
        let raw_amount = row.get(1).ok_or(GenesisError::MissingField {
            row: row_index,
            field: "amount",
        })?;

        let amount = Amount::parse(raw_amount).map_err(|_| GenesisError::InvalidAmount {
            row: row_index,
            value: raw_amount.to_string(),
        })?;
        let invalid = |source| GenesisError::InvalidAddress {
            row: row_index,
            address: raw_address.to_string(),
            source,
        };
        let address = convert_prefix(raw_address, prefix).map_err(invalid)?;
        validate_account_address(&address, prefix).map_err(invalid)?;

        if amount.is_zero() {
            tracing::debug!(row = row_index, address = %address, "skipping zero amount");
            skipped += 1;
            continue;
        }

        records.push(RecipientRecord {
            address,
            amount,
            row_index,
        });
    }

    tracing::info!(records = records.len(), skipped, "recipients ingested");
    Ok(records)
}

/// Read a snapshot file. The file is closed before this returns.
pub fn read_recipients_file(
    path: &Path,
    prefix: &str,
) -> Result<Vec<RecipientRecord>, GenesisError> {
    let file = File::open(path).map_err(|source| GenesisError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let _span = tracing::info_span!("ingest", path = %path.display()).entered();
    read_recipients(file, prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use genesis_crypto::AddressError;

    const COSMOS_A: &str = "cosmos17muws0zgrd0vzh37guea7960ym7aqf2jrsf4xh";
    const CRE_A: &str = "cre17muws0zgrd0vzh37guea7960ym7aqf2j8c6sn6";
    const CRE_B: &str = "cre1qyqszqgpqyqszqgpqyqszqgpqyqszqgpkmjmc3";

    fn parse(text: &str) -> Result<Vec<RecipientRecord>, GenesisError> {
        read_recipients(text.as_bytes(), "cre")
    }

    #[test]
    fn reads_and_converts_rows() {
        let text = format!("address,amount\n{COSMOS_A},1000\n{CRE_B},7\n");
        let records = parse(&text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].address.as_str(), CRE_A);
        assert_eq!(records[0].amount, Amount::from(1000u64));
        assert_eq!(records[0].row_index, 1);
        assert_eq!(records[1].address.as_str(), CRE_B);
        assert_eq!(records[1].row_index, 2);
    }

    #[test]
    fn zero_and_empty_amounts_are_dropped() {
        let text = format!("address,amount\n{COSMOS_A},0\n{CRE_B},\n{CRE_A},5\n");
        let records = parse(&text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].row_index, 3);
    }

    #[test]
    fn amounts_beyond_u128_are_exact() {
        let big = "340282366920938463463374607431768211456000";
        let text = format!("address,amount\n{CRE_A},{big}\n");
        let records = parse(&text).unwrap();
        assert_eq!(records[0].amount.to_string(), big);
    }

    #[test]
    fn fractional_amount_is_fatal() {
        let text = format!("address,amount\n{CRE_A},1.5\n");
        let err = parse(&text).unwrap_err();
        assert!(matches!(err, GenesisError::InvalidAmount { row: 1, .. }));
        assert_eq!(err.kind(), ErrorKind::InputMalformation);
    }

    #[test]
    fn bad_address_is_fatal_even_with_zero_amount() {
        let text = "address,amount\ncosmos1invalid,0\n";
        let err = parse(text).unwrap_err();
        assert!(matches!(err, GenesisError::InvalidAddress { row: 1, .. }));
    }

    #[test]
    fn short_account_payload_is_row_error() {
        let short = genesis_crypto::encode_account_address("cosmos", &[9u8; 16]).unwrap();
        let text = format!("address,amount\n{CRE_A},10\n{short},25\n");
        let err = parse(&text).unwrap_err();
        match &err {
            GenesisError::InvalidAddress {
                row,
                address,
                source: AddressError::InvalidLength { len, .. },
            } => {
                assert_eq!(*row, 2);
                assert_eq!(address, short.as_str());
                assert_eq!(*len, 16);
            }
            other => panic!("unexpected error {other}"),
        }
        assert_eq!(err.kind(), ErrorKind::InputMalformation);
    }

    #[test]
    fn header_only_yields_nothing() {
        assert!(parse("address,amount\n").unwrap().is_empty());
    }

    #[test]
    fn ragged_row_is_fatal() {
        let text = format!("address,amount\n{CRE_A}\n");
        assert!(matches!(parse(&text), Err(GenesisError::Csv(_))));
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.csv");
        std::fs::write(&path, format!("address,amount\n{CRE_A},10\n")).unwrap();
        let records = read_recipients_file(&path, "cre").unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_recipients_file(Path::new("/nonexistent/result.csv"), "cre").unwrap_err();
        assert!(matches!(err, GenesisError::Io { .. }));
    }
}
