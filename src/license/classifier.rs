use crate::license::spdx::SpdxExpression;
use crate::models::LicenseRisk;

/// Classify a parsed license expression into a risk level.
///
/// - `OR`   → most permissive side wins
/// - `AND`  → most restrictive side wins
/// - `WITH` → the base license decides
/// - `LicenseRef-…` references are never known, so they are `Unknown`
pub fn classify(expr: &SpdxExpression) -> LicenseRisk {
    match expr {
        SpdxExpression::License { id, .. } => classify_spdx_id(id),
        SpdxExpression::LicenseRef(_) => LicenseRisk::Unknown,
        SpdxExpression::With { license, .. } => classify(license),
        SpdxExpression::Or(left, right) => most_permissive(classify(left), classify(right)),
        SpdxExpression::And(left, right) => most_restrictive(classify(left), classify(right)),
    }
}

/// Classify a single canonical SPDX identifier into a risk level.
pub fn classify_spdx_id(id: &str) -> LicenseRisk {
    match id {
        // Permissive
        "MIT"
        | "MIT-0"
        | "Apache-2.0"
        | "BSD-1-Clause"
        | "BSD-2-Clause"
        | "BSD-3-Clause"
        | "BSD-4-Clause"
        | "BSL-1.0"
        | "ISC"
        | "0BSD"
        | "Unlicense"
        | "Zlib"
        | "CC0-1.0"
        | "WTFPL"
        | "CC-BY-4.0"
        | "CC-BY-3.0"
        | "PSF-2.0"
        | "Python-2.0"
        | "BlueOak-1.0.0"
        | "Unicode-DFS-2016"
        | "UPL-1.0"
        | "Artistic-2.0" => LicenseRisk::Permissive,

        // Weak copyleft
        "LGPL-2.0-only"
        | "LGPL-2.0-or-later"
        | "LGPL-2.1-only"
        | "LGPL-2.1-or-later"
        | "LGPL-3.0-only"
        | "LGPL-3.0-or-later"
        | "MPL-1.1"
        | "MPL-2.0"
        | "EUPL-1.2"
        | "CDDL-1.0"
        | "CDDL-1.1"
        | "EPL-1.0"
        | "EPL-2.0"
        | "APSL-2.0"
        | "OSL-3.0" => LicenseRisk::WeakCopyleft,

        // Strong copyleft
        "GPL-2.0-only"
        | "GPL-2.0-or-later"
        | "GPL-3.0-only"
        | "GPL-3.0-or-later"
        | "AGPL-3.0-only"
        | "AGPL-3.0-or-later"
        | "SSPL-1.0"
        | "EUPL-1.1" => LicenseRisk::StrongCopyleft,

        // Source-available / non-commercial
        "BUSL-1.1" | "CC-BY-NC-4.0" | "CC-BY-NC-ND-4.0" | "CC-BY-NC-SA-4.0" => {
            LicenseRisk::Proprietary
        }

        _ => LicenseRisk::Unknown,
    }
}

fn rank_permissive(risk: &LicenseRisk) -> u8 {
    match risk {
        LicenseRisk::Permissive => 0,
        LicenseRisk::WeakCopyleft => 1,
        LicenseRisk::StrongCopyleft => 2,
        LicenseRisk::Proprietary => 3,
        LicenseRisk::Unknown => 4,
    }
}

fn rank_restrictive(risk: &LicenseRisk) -> u8 {
    match risk {
        LicenseRisk::Proprietary => 0,
        LicenseRisk::StrongCopyleft => 1,
        LicenseRisk::WeakCopyleft => 2,
        LicenseRisk::Permissive => 3,
        LicenseRisk::Unknown => 4,
    }
}

fn most_permissive(a: LicenseRisk, b: LicenseRisk) -> LicenseRisk {
    if rank_permissive(&b) < rank_permissive(&a) {
        b
    } else {
        a
    }
}

fn most_restrictive(a: LicenseRisk, b: LicenseRisk) -> LicenseRisk {
    if rank_restrictive(&b) < rank_restrictive(&a) {
        b
    } else {
        a
    }
}
