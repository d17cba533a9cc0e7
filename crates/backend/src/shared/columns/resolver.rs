use contracts::shared::columns::ColumnRole;
use std::collections::BTreeMap;

use super::normalize::{contains_number, normalize_token};

/// A header that a role or marker resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    /// Position in the header row, left to right
    pub index: usize,
    /// Header text as it appears in the source
    pub name: String,
}

/// Header predicate, evaluated against the normalized header
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// Contains every keyword of `all` and none of `none`
    Contains {
        all: &'static [&'static str],
        none: &'static [&'static str],
    },
    /// Contains at least one of the keywords
    Any(&'static [&'static str]),
    /// Equal to the whole header
    Exact(&'static str),
    /// One of the whitespace-separated words of the header
    Word(&'static str),
}

impl Matcher {
    pub fn matches(&self, header: &str) -> bool {
        match self {
            Matcher::Contains { all, none } => {
                all.iter().all(|k| header.contains(k)) && !none.iter().any(|k| header.contains(k))
            }
            Matcher::Any(keywords) => keywords.iter().any(|k| header.contains(k)),
            Matcher::Exact(expected) => header == *expected,
            Matcher::Word(word) => header.split(' ').any(|w| w == *word),
        }
    }
}

pub struct RoleRule {
    pub role: ColumnRole,
    pub matcher: Matcher,
}

const fn contains(role: ColumnRole, all: &'static [&'static str]) -> RoleRule {
    RoleRule {
        role,
        matcher: Matcher::Contains { all, none: &[] },
    }
}

const fn contains_without(
    role: ColumnRole,
    all: &'static [&'static str],
    none: &'static [&'static str],
) -> RoleRule {
    RoleRule {
        role,
        matcher: Matcher::Contains { all, none },
    }
}

const fn exact(role: ColumnRole, header: &'static str) -> RoleRule {
    RoleRule {
        role,
        matcher: Matcher::Exact(header),
    }
}

/// Ordered resolution rules. For each role the rules are tried top to bottom;
/// the first rule that matches any header wins and later rules for that role
/// are not consulted. New header variants are added here, not in `resolve`.
pub const ROLE_RULES: &[RoleRule] = &[
    contains(ColumnRole::DeliveryDate, &["CONFIRM", "ENTREGA"]),
    contains_without(ColumnRole::DeliveryDate, &["FECHA"], &["FACTUR"]),
    contains(ColumnRole::ArrivalDate, &["ARRIBO"]),
    exact(ColumnRole::InvoicingDate, "FECHA FACTURACION"),
    exact(ColumnRole::PaperworkDate, "FECHA DISPONIBILIDAD DOCUMENTACION"),
    // TEL also covers TELEFONO
    RoleRule {
        role: ColumnRole::Phone,
        matcher: Matcher::Any(&["TELEFONO", "CELULAR", "TEL"]),
    },
    contains(ColumnRole::Email, &["MAIL"]),
    contains(ColumnRole::AdminStatus, &["ESTADO", "ADMIN"]),
    exact(ColumnRole::LifecycleStatus, "ESTADO"),
    contains_without(ColumnRole::LifecycleStatus, &["ESTADO"], &["ADMIN"]),
    RoleRule {
        role: ColumnRole::Vin,
        matcher: Matcher::Word("VIN"),
    },
];

/// Keywords marking a per-interval "maintenance done" column
pub const COMPLETED_KEYWORDS: &[&str] = &["REALIZADO", "HECHO", "COMPLETADO"];

/// Result of header resolution. Every role is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedColumns {
    roles: BTreeMap<ColumnRole, ColumnRef>,
    markers: BTreeMap<u32, ColumnRef>,
}

impl ResolvedColumns {
    pub fn get(&self, role: ColumnRole) -> Option<&ColumnRef> {
        self.roles.get(&role)
    }

    pub fn index(&self, role: ColumnRole) -> Option<usize> {
        self.get(role).map(|c| c.index)
    }

    pub fn is_resolved(&self, role: ColumnRole) -> bool {
        self.roles.contains_key(&role)
    }

    /// Completion marker column for a service interval
    pub fn marker(&self, interval_days: u32) -> Option<&ColumnRef> {
        self.markers.get(&interval_days)
    }

    /// Intervals with a marker column, ascending
    pub fn tracked_intervals(&self) -> Vec<u32> {
        self.markers.keys().copied().collect()
    }

    /// Every role with its header name, `None` when unresolved
    pub fn role_names(&self) -> BTreeMap<ColumnRole, Option<String>> {
        ColumnRole::ALL
            .iter()
            .map(|role| (*role, self.get(*role).map(|c| c.name.clone())))
            .collect()
    }
}

/// Map raw headers onto logical roles and locate the completion marker of
/// each service interval.
///
/// Deterministic: among headers satisfying a rule, the left-most one wins.
pub fn resolve(headers: &[String], intervals: &[u32]) -> ResolvedColumns {
    let normalized: Vec<String> = headers.iter().map(|h| normalize_token(h)).collect();
    let column = |index: usize| ColumnRef {
        index,
        name: headers[index].trim().to_string(),
    };

    let mut roles = BTreeMap::new();
    for rule in ROLE_RULES {
        if roles.contains_key(&rule.role) {
            continue;
        }
        if let Some(index) = normalized.iter().position(|h| rule.matcher.matches(h)) {
            roles.insert(rule.role, column(index));
        }
    }

    let mut markers = BTreeMap::new();
    for &days in intervals {
        let numeral = days.to_string();
        let found = normalized.iter().position(|h| {
            contains_number(h, &numeral) && COMPLETED_KEYWORDS.iter().any(|k| h.contains(k))
        });
        if let Some(index) = found {
            markers.insert(days, column(index));
        }
    }

    ResolvedColumns { roles, markers }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVALS: [u32; 6] = [30, 60, 90, 180, 360, 540];

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn name(columns: &ResolvedColumns, role: ColumnRole) -> Option<&str> {
        columns.get(role).map(|c| c.name.as_str())
    }

    #[test]
    fn test_resolves_full_header_row() {
        let h = headers(&[
            "VIN",
            "Fecha de Arribo",
            "Fecha Confirmación Entrega",
            "Teléfono",
            "E-Mail",
            "Estado",
            "Estado Administrativo",
            "Fecha Facturación",
            "Fecha Disponibilidad Documentación",
        ]);
        let columns = resolve(&h, &INTERVALS);

        assert_eq!(name(&columns, ColumnRole::Vin), Some("VIN"));
        assert_eq!(name(&columns, ColumnRole::ArrivalDate), Some("Fecha de Arribo"));
        assert_eq!(
            name(&columns, ColumnRole::DeliveryDate),
            Some("Fecha Confirmación Entrega")
        );
        assert_eq!(name(&columns, ColumnRole::Phone), Some("Teléfono"));
        assert_eq!(name(&columns, ColumnRole::Email), Some("E-Mail"));
        assert_eq!(name(&columns, ColumnRole::LifecycleStatus), Some("Estado"));
        assert_eq!(
            name(&columns, ColumnRole::AdminStatus),
            Some("Estado Administrativo")
        );
        assert_eq!(
            name(&columns, ColumnRole::InvoicingDate),
            Some("Fecha Facturación")
        );
        assert_eq!(
            name(&columns, ColumnRole::PaperworkDate),
            Some("Fecha Disponibilidad Documentación")
        );
        assert_eq!(columns.index(ColumnRole::ArrivalDate), Some(1));
    }

    #[test]
    fn test_specific_delivery_pattern_beats_fallback() {
        // The generic date column comes first but must not be chosen
        let h = headers(&["FECHA VENTA", "FECHA CONFIRMACION ENTREGA"]);
        let columns = resolve(&h, &[]);
        assert_eq!(
            name(&columns, ColumnRole::DeliveryDate),
            Some("FECHA CONFIRMACION ENTREGA")
        );
    }

    #[test]
    fn test_delivery_fallback_skips_invoice_dates() {
        let h = headers(&["FECHA FACTURACION", "FECHA ENTREGA"]);
        let columns = resolve(&h, &[]);
        assert_eq!(name(&columns, ColumnRole::DeliveryDate), Some("FECHA ENTREGA"));

        let only_invoice = headers(&["FECHA FACTURACION", "CLIENTE"]);
        assert_eq!(resolve(&only_invoice, &[]).get(ColumnRole::DeliveryDate), None);
    }

    #[test]
    fn test_first_declared_header_wins() {
        let h = headers(&["FECHA ARRIBO UNIDAD", "FECHA DE ARRIBO"]);
        let columns = resolve(&h, &[]);
        assert_eq!(
            name(&columns, ColumnRole::ArrivalDate),
            Some("FECHA ARRIBO UNIDAD")
        );

        let swapped = headers(&["FECHA DE ARRIBO", "FECHA ARRIBO UNIDAD"]);
        assert_eq!(
            name(&resolve(&swapped, &[]), ColumnRole::ArrivalDate),
            Some("FECHA DE ARRIBO")
        );
    }

    #[test]
    fn test_duplicate_headers_resolve_to_leftmost_position() {
        let h = headers(&["CLIENTE", "MAIL", "MAIL"]);
        assert_eq!(resolve(&h, &[]).index(ColumnRole::Email), Some(1));
    }

    #[test]
    fn test_phone_takes_leftmost_candidate() {
        let h = headers(&["CELULAR", "TELEFONO"]);
        assert_eq!(name(&resolve(&h, &[]), ColumnRole::Phone), Some("CELULAR"));

        let h = headers(&["TELEFONO", "CELULAR"]);
        assert_eq!(name(&resolve(&h, &[]), ColumnRole::Phone), Some("TELEFONO"));

        let h = headers(&["CLIENTE", "TEL. FIJO", "OTRO"]);
        assert_eq!(name(&resolve(&h, &[]), ColumnRole::Phone), Some("TEL. FIJO"));
    }

    #[test]
    fn test_lifecycle_status_excludes_admin_status() {
        let h = headers(&["ESTADO ADMIN", "ESTADO UNIDAD"]);
        let columns = resolve(&h, &[]);
        assert_eq!(name(&columns, ColumnRole::LifecycleStatus), Some("ESTADO UNIDAD"));
        assert_eq!(name(&columns, ColumnRole::AdminStatus), Some("ESTADO ADMIN"));
    }

    #[test]
    fn test_unresolved_roles_are_none() {
        let columns = resolve(&headers(&["CLIENTE", "MARCA"]), &INTERVALS);
        for role in ColumnRole::ALL {
            assert!(!columns.is_resolved(role));
        }
        assert!(columns.tracked_intervals().is_empty());
        assert!(columns.role_names().values().all(Option::is_none));
        assert!(resolve(&[], &INTERVALS).role_names().len() == ColumnRole::ALL.len());
    }

    #[test]
    fn test_interval_markers_use_whole_numbers() {
        let h = headers(&[
            "CONTROL 360 DIAS REALIZADO",
            "CONTROL 60 DIAS REALIZADO",
            "CONTROL 30 DIAS",
            "Service 90 hecho",
        ]);
        let columns = resolve(&h, &INTERVALS);
        assert_eq!(columns.marker(360).map(|c| c.index), Some(0));
        assert_eq!(columns.marker(60).map(|c| c.index), Some(1));
        // no "completed" keyword
        assert!(columns.marker(30).is_none());
        assert_eq!(columns.marker(90).map(|c| c.index), Some(3));
        assert_eq!(columns.tracked_intervals(), vec![60, 90, 360]);
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let h = headers(&[
            "FECHA ARRIBO UNIDAD",
            "FECHA DE ARRIBO",
            "FECHA",
            "MAIL",
            "CONTROL 30 REALIZADO",
        ]);
        let first = resolve(&h, &INTERVALS);
        for _ in 0..5 {
            assert_eq!(resolve(&h, &INTERVALS), first);
        }
    }
}
