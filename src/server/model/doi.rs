//! DOI domain models.

use crate::model::doi::ParsedDoiDto;

/// Components decoded from a journal DOI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedDoi {
    Manuscript {
        year: i32,
        volume: i32,
        issue: i32,
        sequence: i32,
    },
    /// Corrections carry `00` where manuscripts carry volume and issue.
    Correction { year: i32, sequence: i32 },
}

impl ParsedDoi {
    pub fn into_dto(self) -> ParsedDoiDto {
        match self {
            Self::Manuscript {
                year,
                volume,
                issue,
                sequence,
            } => ParsedDoiDto::Manuscript {
                year,
                volume,
                issue,
                sequence,
            },
            Self::Correction { year, sequence } => ParsedDoiDto::Correction { year, sequence },
        }
    }
}

/// Record whose own DOI is ignored by a uniqueness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoiOwner {
    Manuscript(i32),
    Correction(i32),
}
