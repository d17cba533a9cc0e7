use chrono::{Datelike, NaiveDate};
use contracts::dashboards::d400_delivery_schedule::{
    DeliveryScheduleRequest, DeliveryScheduleResponse, DeliveryViewMode, MonthOption,
};
use contracts::shared::columns::ColumnRole;
use contracts::shared::view::ViewState;
use std::collections::BTreeMap;

use crate::dashboards::table_layout::{precondition, state_for, TableLayout, ViewColumn};
use crate::domain::a001_vehicle::{Snapshot, VehicleRecord};
use crate::shared::columns::dates::month_name;
use crate::shared::format::format_date_dmy;

/// Free-text delivery hour, secondary sort key
const DELIVERY_HOUR: &str = "HS DE ENTREGA AL CLIENTE";

const COLUMNS: &[ViewColumn] = &[
    ViewColumn::Role(ColumnRole::DeliveryDate, "Date"),
    ViewColumn::Raw(DELIVERY_HOUR),
    ViewColumn::Raw("CLIENTE"),
    ViewColumn::Role(ColumnRole::AdminStatus, "Admin status"),
    ViewColumn::Raw("MARCA"),
    ViewColumn::Raw("MODELO"),
    ViewColumn::Role(ColumnRole::Vin, "VIN"),
    ViewColumn::Raw("CANAL DE VENTA"),
    ViewColumn::Role(ColumnRole::Phone, "Phone"),
    ViewColumn::Role(ColumnRole::Email, "Email"),
    ViewColumn::Raw("VENDEDOR"),
];

/// Build the delivery agenda for one year.
///
/// `today` splits the year into delivered (before today) and scheduled
/// (today or later).
pub fn build_delivery_schedule(
    snapshot: &Snapshot,
    request: &DeliveryScheduleRequest,
    today: NaiveDate,
) -> DeliveryScheduleResponse {
    let mut response = DeliveryScheduleResponse {
        state: ViewState::Ready,
        years: Vec::new(),
        selected_year: None,
        mode: request.mode,
        delivered_count: 0,
        scheduled_count: 0,
        months: Vec::new(),
        selected_month: None,
        first_day: None,
        last_day: None,
        title: String::new(),
        columns: Vec::new(),
        rows: Vec::new(),
    };

    if let Some(state) = precondition(snapshot, ColumnRole::DeliveryDate) {
        response.state = state;
        return response;
    }

    // (record, delivery date) for every record with a parsed date
    let dated: Vec<(&VehicleRecord, NaiveDate)> = snapshot
        .records
        .iter()
        .filter_map(|r| r.delivery_date.map(|d| (r, d)))
        .collect();

    let mut years: Vec<i32> = dated
        .iter()
        .filter_map(|(r, _)| r.delivery_calendar().map(|c| c.year))
        .collect();
    years.sort_unstable();
    years.dedup();
    response.years = years;

    let Some(year) = request.year.or_else(|| response.years.last().copied()) else {
        response.state = ViewState::NoMatches;
        return response;
    };
    response.selected_year = Some(year);

    let in_year: Vec<(&VehicleRecord, NaiveDate)> = dated
        .into_iter()
        .filter(|(r, _)| r.delivery_calendar().is_some_and(|c| c.year == year))
        .collect();
    let (delivered, scheduled): (Vec<_>, Vec<_>) =
        in_year.iter().copied().partition(|(_, d)| *d < today);
    response.delivered_count = delivered.len();
    response.scheduled_count = scheduled.len();

    let mut selected = match request.mode {
        DeliveryViewMode::Delivered => {
            response.title = format!("Delivered history - {}", year);
            delivered
        }
        DeliveryViewMode::Scheduled => {
            response.title = format!("Pending agenda - {}", year);
            scheduled
        }
        DeliveryViewMode::Month => {
            let months: BTreeMap<u32, &'static str> = in_year
                .iter()
                .filter_map(|(r, _)| r.delivery_calendar().map(|c| (c.month, c.month_name)))
                .collect();
            response.months = months
                .iter()
                .map(|(number, name)| MonthOption {
                    number: *number,
                    name: name.to_string(),
                })
                .collect();

            // A day picked without a month selects that day's month
            let requested_month = request.month.or_else(|| {
                request
                    .day
                    .filter(|d| d.year() == year)
                    .map(|d| d.month())
            });
            let Some(month) = requested_month
                .filter(|m| months.contains_key(m))
                .or_else(|| months.keys().next().copied())
            else {
                response.state = ViewState::NoMatches;
                return response;
            };
            response.selected_month = Some(month);

            let in_month: Vec<(&VehicleRecord, NaiveDate)> = in_year
                .into_iter()
                .filter(|(r, _)| r.delivery_calendar().is_some_and(|c| c.month == month))
                .collect();
            response.first_day = in_month.iter().map(|(_, d)| *d).min();
            response.last_day = in_month.iter().map(|(_, d)| *d).max();

            match request.day {
                Some(day) => {
                    let on_day: Vec<_> = in_month.into_iter().filter(|(_, d)| *d == day).collect();
                    response.title = format!(
                        "Schedule for {} ({})",
                        format_date_dmy(day),
                        on_day.len()
                    );
                    on_day
                }
                None => {
                    response.title = format!(
                        "Monthly schedule - {} ({})",
                        month_name(month),
                        in_month.len()
                    );
                    in_month
                }
            }
        }
    };

    let hour_column = snapshot.header_index(DELIVERY_HOUR);
    selected.sort_by(|(a, a_date), (b, b_date)| {
        let a_hour = hour_column.and_then(|i| a.cell(i)).unwrap_or("");
        let b_hour = hour_column.and_then(|i| b.cell(i)).unwrap_or("");
        a_date.cmp(b_date).then_with(|| a_hour.cmp(b_hour))
    });

    let layout = TableLayout::bind(snapshot, COLUMNS);
    response.columns = layout.columns();
    response.rows = selected
        .into_iter()
        .map(|(record, _)| layout.row(record, None))
        .collect();
    response.state = state_for(&response.rows);

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::source::parse_csv;

    const CSV: &str = "\
VIN,CLIENTE,ESTADO ADMINISTRATIVO,FECHA CONFIRMACION ENTREGA,HS DE ENTREGA AL CLIENTE,TELEFONO
A1,Ana,Facturado,10/01/2024,11:00,351 555
A2,Beto,Pendiente,10/01/2024,09:30,
A3,Caro,Facturado,20/02/2024,10:00,
A4,Dani,Facturado,05/03/2025,10:00,
A5,Eva,Facturado,sin fecha,,
";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn snapshot() -> Snapshot {
        Snapshot::from_table(parse_csv(CSV).unwrap())
    }

    fn vins(response: &DeliveryScheduleResponse) -> Vec<&str> {
        response.rows.iter().filter_map(|r| r.vin.as_deref()).collect()
    }

    fn request(mode: DeliveryViewMode) -> DeliveryScheduleRequest {
        DeliveryScheduleRequest {
            year: Some(2024),
            mode,
            ..Default::default()
        }
    }

    #[test]
    fn test_years_default_to_latest() {
        let response = build_delivery_schedule(
            &snapshot(),
            &DeliveryScheduleRequest::default(),
            date(2024, 2, 1),
        );
        assert_eq!(response.years, vec![2024, 2025]);
        assert_eq!(response.selected_year, Some(2025));
        assert_eq!(vins(&response), vec!["A4"]);
        assert_eq!(response.title, "Pending agenda - 2025");
    }

    #[test]
    fn test_delivered_and_scheduled_split_on_today() {
        let s = snapshot();
        // A3 is due on "today" and counts as scheduled
        let today = date(2024, 2, 20);

        let delivered = build_delivery_schedule(&s, &request(DeliveryViewMode::Delivered), today);
        assert_eq!(delivered.delivered_count, 2);
        assert_eq!(delivered.scheduled_count, 1);
        assert_eq!(delivered.title, "Delivered history - 2024");
        // same date: sorted by hour text
        assert_eq!(vins(&delivered), vec!["A2", "A1"]);

        let scheduled = build_delivery_schedule(&s, &request(DeliveryViewMode::Scheduled), today);
        assert_eq!(vins(&scheduled), vec!["A3"]);
    }

    #[test]
    fn test_month_mode() {
        let s = snapshot();
        let mut req = request(DeliveryViewMode::Month);

        let response = build_delivery_schedule(&s, &req, date(2024, 2, 1));
        let months: Vec<(u32, &str)> = response
            .months
            .iter()
            .map(|m| (m.number, m.name.as_str()))
            .collect();
        assert_eq!(months, vec![(1, "January"), (2, "February")]);
        assert_eq!(response.selected_month, Some(1));
        assert_eq!(response.title, "Monthly schedule - January (2)");
        assert_eq!(response.first_day, Some(date(2024, 1, 10)));

        req.month = Some(2);
        let response = build_delivery_schedule(&s, &req, date(2024, 2, 1));
        assert_eq!(vins(&response), vec!["A3"]);

        req.month = Some(1);
        req.day = Some(date(2024, 1, 10));
        let response = build_delivery_schedule(&s, &req, date(2024, 2, 1));
        assert_eq!(response.title, "Schedule for 10/01/2024 (2)");

        req.day = Some(date(2024, 1, 11));
        let response = build_delivery_schedule(&s, &req, date(2024, 2, 1));
        assert_eq!(response.state, ViewState::NoMatches);
        assert_eq!(response.title, "Schedule for 11/01/2024 (0)");
    }

    #[test]
    fn test_day_without_month_selects_its_month() {
        let req = DeliveryScheduleRequest {
            year: Some(2024),
            mode: DeliveryViewMode::Month,
            day: Some(date(2024, 2, 20)),
            ..Default::default()
        };
        let response = build_delivery_schedule(&snapshot(), &req, date(2024, 2, 1));
        assert_eq!(response.selected_month, Some(2));
        assert_eq!(vins(&response), vec!["A3"]);
        assert_eq!(response.title, "Schedule for 20/02/2024 (1)");
        assert_eq!(response.state, ViewState::Ready);
    }

    #[test]
    fn test_columns_follow_agenda_order() {
        let response = build_delivery_schedule(
            &snapshot(),
            &request(DeliveryViewMode::Delivered),
            date(2025, 1, 1),
        );
        let keys: Vec<&str> = response.columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "delivery_date",
                "HS DE ENTREGA AL CLIENTE",
                "CLIENTE",
                "admin_status",
                "vin",
                "phone"
            ]
        );
        let first = &response.rows[0];
        assert_eq!(first.values.get("delivery_date").map(String::as_str), Some("2024-01-10"));
    }

    #[test]
    fn test_unavailable_without_delivery_column() {
        let s = Snapshot::from_table(parse_csv("VIN,CLIENTE\nA1,Ana\n").unwrap());
        let response = build_delivery_schedule(&s, &DeliveryScheduleRequest::default(), date(2024, 1, 1));
        assert_eq!(
            response.state,
            ViewState::Unavailable {
                role: ColumnRole::DeliveryDate
            }
        );
        assert!(response.rows.is_empty());
    }

    #[test]
    fn test_no_dates_is_no_matches() {
        let s = Snapshot::from_table(parse_csv("VIN,FECHA ENTREGA\nA1,\n").unwrap());
        let response = build_delivery_schedule(&s, &DeliveryScheduleRequest::default(), date(2024, 1, 1));
        assert_eq!(response.state, ViewState::NoMatches);
        assert!(response.years.is_empty());
    }
}
