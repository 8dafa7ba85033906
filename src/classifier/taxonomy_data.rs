// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Compiled-in default taxonomy, covering the license families most
// commonly found in open source trees: MPL, GPL/LGPL/AGPL, BSD, MIT and
// Apache-2.0. Patterns are written against the single-line, whitespace-
// collapsed form the normalizer produces, so wording that spans line
// breaks in the original text still matches here.

use super::{LicenseRule, Taxonomy};

fn mpl() -> LicenseRule {
    LicenseRule::new(
        "MPL-2.0",
        r"Mozilla Public License, v\. 2\.0|MPL.{0,5}2\.0",
    )
    .start(r"This Source Code Form is subject to the terms of the Mozilla Public")
    .end(r"http://mozilla\.org/MPL/2\.0/")
    .cancels(&["MPL-2.0_urlref"])
}

fn mpl_1_1() -> LicenseRule {
    LicenseRule::new("MPL-1.1", r"Mozilla Public License Version 1\.1|MPL.{0,5}1\.1")
        .end(r"under the terms of either|GNU General Public License")
}

fn gpl_family() -> LicenseRule {
    LicenseRule::new(
        "GPL",
        r"GNU GENERAL PUBLIC LICENSE|GNU General Public License",
    )
    .start(r"GNU GENERAL PUBLIC LICENSE|This (?:program|file) is free software")
    .end(r"along with this program|see <http://www\.gnu\.org/licenses/>")
    .max_lines(40)
    .subs(vec![
        LicenseRule::new("GPL-1.0+", r"either version 1.{0,40}or \(at your option\) any later")
            .cancels(&["GPL-2.0", "GPL-3.0"]),
        LicenseRule::new(
            "GPL-2.0",
            r"either version 2.{0,40}or \(at your option\) any later version|version 2 of the License",
        )
        .subs(vec![LicenseRule::new(
            "GPL-2.0-only",
            r"version 2 of the License, and only version 2",
        )]),
        LicenseRule::new(
            "GPL-3.0",
            r"either version 3.{0,40}or \(at your option\) any later version|version 3 of the License",
        ),
        LicenseRule::new(
            "LGPL",
            r"GNU LESSER GENERAL PUBLIC LICENSE|GNU Lesser General Public License",
        )
        .subs(vec![
            LicenseRule::new("LGPL-2.1", r"version 2\.1 of the License"),
            LicenseRule::new("LGPL-3.0", r"version 3 of the License.{0,80}Lesser"),
        ]),
        LicenseRule::new(
            "AGPL-3.0",
            r"GNU AFFERO GENERAL PUBLIC LICENSE|GNU Affero General Public License",
        ),
    ])
}

fn bsd_family() -> LicenseRule {
    LicenseRule::new(
        "BSD-2-Clause",
        r"Redistribution and use in source and binary forms",
    )
    .start(r"Redistribution and use in source and binary forms")
    .end(r"OF THE POSSIBILITY OF SUCH DAMAGE|ARISING IN ANY WAY OUT OF THE USE")
    .max_lines(35)
    .subs(vec![LicenseRule::new(
        "BSD-3-Clause",
        r"Neither the name of .{0,80}nor the names of its contributors",
    )
    .subs(vec![LicenseRule::new(
        "BSD-4-Clause",
        r"All advertising materials mentioning features or use of this software",
    )])])
}

fn mit() -> LicenseRule {
    LicenseRule::new(
        "MIT",
        r"Permission is hereby granted, (?:free of charge|without written agreement)|licensed under the MIT",
    )
    .end(r"OTHER DEALINGS IN THE SOFTWARE|copyright holder")
    .max_lines(25)
    .subs(vec![LicenseRule::new(
        "MIT|GPL-2.0_urlref",
        r"Dual licensed under the MIT (?:and|or) GPL",
    )
    .start(r"Dual licensed under the MIT")
    .end(r"jquery\.(?:com|org)/[Ll]icense|licenses\.")])
}

fn apache_2() -> LicenseRule {
    LicenseRule::new(
        "Apache-2.0",
        r"Licensed under the Apache License, Version 2\.0|Licensed to the Apache Software Foundation \(ASF\)",
    )
    .start(r"Licensed under the Apache License")
    .end(r"limitations under the License")
    .max_lines(20)
    .cancels(&["Apache-2.0_urlref"])
}

/// Tags a block that merely links to the Apache-2.0 license without quoting
/// it; cancelled out whenever a fuller match (e.g. `Apache-2.0`) is also
/// present, since the fuller tag is strictly more informative. A full
/// Apache-2.0 header routinely includes this same URL, so without the
/// cancellation a fully-quoted header would mislabel as the bare-link tag.
fn apache_urlref() -> LicenseRule {
    LicenseRule::new("Apache-2.0_urlref", r"http://www\.apache\.org/licenses/LICENSE-2\.0")
}

fn isc() -> LicenseRule {
    LicenseRule::new(
        "ISC",
        r"Permission to use, copy, modify, and/or distribute this software for any purpose",
    )
    .end(r"PERFORMANCE OF THIS SOFTWARE")
}

fn unlicense() -> LicenseRule {
    LicenseRule::new("Unlicense", r"This is free and unencumbered software released into the public domain")
}

fn cc0() -> LicenseRule {
    LicenseRule::new("CC0-1.0", r"CC0 1\.0 Universal|Creative Commons.{0,20}CC0")
}

/// Tags a block that merely links to a license without quoting it; cancelled
/// out whenever a fuller match (e.g. `MPL-2.0`) is also present, since the
/// fuller tag is strictly more informative.
fn mpl_urlref() -> LicenseRule {
    LicenseRule::new("MPL-2.0_urlref", r"http://mozilla\.org/MPL/2\.0/")
}

/// The compiled-in default taxonomy. Callers that need a custom or narrower
/// taxonomy build their own [`Taxonomy`] and compile it with
/// [`super::Classifier::build`] instead of calling this.
pub fn default_taxonomy() -> Taxonomy {
    Taxonomy::new(vec![
        mpl(),
        mpl_1_1(),
        mpl_urlref(),
        gpl_family(),
        bsd_family(),
        mit(),
        apache_2(),
        apache_urlref(),
        isc(),
        unlicense(),
        cc0(),
    ])
}
