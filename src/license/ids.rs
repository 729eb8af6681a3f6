//! Identifier lookups against the SPDX license list bundled with the `spdx` crate.
//!
//! SPDX identifiers match case-insensitively; lookups hand back the canonical spelling.

/// An identifier found on the SPDX list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listed {
    pub id: &'static str,
    pub deprecated: bool,
}

pub fn license(id: &str) -> Option<Listed> {
    let license = spdx::license_id(id).or_else(|| {
        spdx::identifiers::LICENSES
            .iter()
            .find(|entry| entry.0.eq_ignore_ascii_case(id))
            .and_then(|entry| spdx::license_id(entry.0))
    })?;

    Some(Listed {
        id: license.name,
        deprecated: license.is_deprecated(),
    })
}

pub fn exception(id: &str) -> Option<Listed> {
    let exception = spdx::exception_id(id).or_else(|| {
        spdx::identifiers::EXCEPTIONS
            .iter()
            .find(|entry| entry.0.eq_ignore_ascii_case(id))
            .and_then(|entry| spdx::exception_id(entry.0))
    })?;

    Some(Listed {
        id: exception.name,
        deprecated: exception.is_deprecated(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current(id: &'static str) -> Option<Listed> {
        Some(Listed {
            id,
            deprecated: false,
        })
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(license("apache-2.0"), current("Apache-2.0"));
        assert_eq!(license("mit"), current("MIT"));
        assert_eq!(exception("llvm-exception"), current("LLVM-exception"));
    }

    #[test]
    fn test_less_common_licenses_are_listed() {
        for id in ["Unicode-3.0", "Vim", "bzip2-1.0.6", "BSD-3-Clause-Modification", "Zlib"] {
            assert_eq!(license(id), current(id), "{id}");
        }
    }

    #[test]
    fn test_deprecated_flag() {
        assert_eq!(
            license("GPL-2.0"),
            Some(Listed {
                id: "GPL-2.0",
                deprecated: true
            })
        );
        assert!(license("LGPL-2.1").unwrap().deprecated);
        assert!(!license("GPL-2.0-only").unwrap().deprecated);
    }

    #[test]
    fn test_unlisted() {
        assert_eq!(license("OTHER"), None);
        assert_eq!(license("Custom-1.0"), None);
        assert_eq!(exception("MIT"), None);
    }
}
