//! Family/icon resolution: which icon is available in which symbol family,
//! where to download it, and what its generated constant is called.

use crate::config::{DEFAULT_SVG_URL_TEMPLATE, ICON_SIZE_PX};
use crate::metadata::Metadata;
use std::collections::{BTreeMap, BTreeSet};

/// Families whose name contains this marker are symbol families.
pub const SYMBOL_FAMILY_MARKER: &str = "Symbols";

/// An icon and the symbol families it is available in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    pub name: String,
    pub version: i64,
    pub families: BTreeSet<String>,
}

/// One SVG to download for one family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Identifier-safe constant name.
    pub name: String,
    /// Fully resolved SVG URL.
    pub url: String,
}

/// Family name → requests for that family, in manifest order.
pub type FetchPlan = BTreeMap<String, Vec<FetchRequest>>;

/// Distinct family names containing [`SYMBOL_FAMILY_MARKER`].
pub fn resolve_families(metadata: &Metadata) -> BTreeSet<String> {
    metadata
        .families
        .iter()
        .filter(|f| f.contains(SYMBOL_FAMILY_MARKER))
        .cloned()
        .collect()
}

/// Yields one [`Icon`] per manifest record: all symbol families minus the
/// record's unsupported families.
pub fn resolve_icons(metadata: &Metadata) -> impl Iterator<Item = Icon> + '_ {
    let families = resolve_families(metadata);
    metadata.icons.iter().map(move |raw| {
        let unsupported: BTreeSet<&str> =
            raw.unsupported_families.iter().map(String::as_str).collect();
        Icon {
            name: raw.name.clone(),
            version: raw.version,
            families: families
                .iter()
                .filter(|f| !unsupported.contains(f.as_str()))
                .cloned()
                .collect(),
        }
    })
}

/// Family segment of the SVG URL: spaces removed, lower-cased.
pub fn family_url_segment(family: &str) -> String {
    family.replace(' ', "").to_lowercase()
}

/// Short name of a family (`"Material Symbols Outlined"` → `"Outlined"`),
/// used for the generated class and file.
pub fn family_short_name(family: &str) -> &str {
    family.split_whitespace().last().unwrap_or(family)
}

/// Download URL of `icon` in `family` using the default template.
pub fn build_url(metadata: &Metadata, icon: &Icon, family: &str) -> String {
    build_url_with(DEFAULT_SVG_URL_TEMPLATE, &metadata.host, &icon.name, family)
}

/// Fills `{host}`, `{family}`, `{icon}` and `{size_px}` in `template`.
pub fn build_url_with(template: &str, host: &str, icon_name: &str, family: &str) -> String {
    template
        .replace("{host}", host)
        .replace("{family}", &family_url_segment(family))
        .replace("{icon}", icon_name)
        .replace("{size_px}", &ICON_SIZE_PX.to_string())
}

/// Converts an icon name into an identifier: underscores split words, each
/// word is title-cased, words are joined, and a leading digit gets a `_` prefix.
///
/// `"3d_rotation"` → `"_3DRotation"`, `"home"` → `"Home"`.
pub fn normalize_constant_name(icon_name: &str) -> String {
    let mut out = String::with_capacity(icon_name.len() + 1);
    let mut after_letter = false;
    for c in icon_name.chars() {
        if c == '_' || c == ' ' {
            after_letter = false;
            continue;
        }
        if c.is_alphabetic() {
            if after_letter {
                out.push(c);
            } else {
                out.extend(c.to_uppercase());
            }
            after_letter = true;
        } else {
            out.push(c);
            after_letter = false;
        }
    }
    if out.starts_with(char::is_numeric) {
        out.insert(0, '_');
    }
    out
}

/// Builds the per-family request lists. Every symbol family is a key, even
/// when no icon supports it.
pub fn plan_fetches(metadata: &Metadata, template: &str) -> FetchPlan {
    let families = resolve_families(metadata);
    let mut plan: FetchPlan = families.iter().map(|f| (f.clone(), Vec::new())).collect();

    for icon in resolve_icons(metadata) {
        for family in &families {
            if !icon.families.contains(family) {
                continue;
            }
            let request = FetchRequest {
                name: normalize_constant_name(&icon.name),
                url: build_url_with(template, &metadata.host, &icon.name, family),
            };
            if let Some(requests) = plan.get_mut(family) {
                requests.push(request);
            }
        }
    }

    plan
}
