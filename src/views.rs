//! Client routes and what each one shows.
//!
//! `Route::from_uri` turns a location (path + query) into a route;
//! `render` turns a route, the caller's session and the catalog into a
//! `View`. Missing records and missing permissions are ordinary views
//! (`NotFound`, `AccessRestricted`), not errors. The only error is a
//! malformed filter parameter.

use axum::extract::Query;
use axum::http::Uri;
use serde::{Deserialize, Serialize};

use crate::booking::{AppointmentBuckets, BookingRequest, TIME_SLOTS};
use crate::catalog::Catalog;
use crate::dashboard::DashboardView;
use crate::filter::{DoctorQuery, FilterError, HospitalQuery};
use crate::models::{Doctor, Hospital, Role};
use crate::session::{Access, Restriction, Session};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteError {
    #[error("Malformed query string: {0}")]
    Query(String),
}

// ═══════════════════════════════════════════════════════════
// Routes
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Home,
    Hospitals(HospitalQuery),
    Hospital { id: String },
    Doctors(DoctorQuery),
    /// `book` asks for the booking dialog to open on arrival.
    Doctor { id: String, book: bool },
    Appointments,
    Dashboard,
    Login,
    Register,
    NotFound { path: String },
}

#[derive(Debug, Default, Deserialize)]
struct DoctorDetailQuery {
    book: Option<String>,
}

impl Route {
    pub fn from_uri(uri: &Uri) -> Result<Self, RouteError> {
        let path = uri.path();
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();

        let route = match segments.as_slice() {
            [] | [""] => Route::Home,
            ["hospitals"] => Route::Hospitals(parse_query(uri)?),
            ["hospitals", id] => Route::Hospital { id: id.to_string() },
            ["doctors"] => Route::Doctors(parse_query(uri)?),
            ["doctors", id] => {
                let query: DoctorDetailQuery = parse_query(uri)?;
                Route::Doctor {
                    id: id.to_string(),
                    book: query.book.as_deref() == Some("true"),
                }
            }
            ["appointments"] => Route::Appointments,
            ["dashboard"] => Route::Dashboard,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            _ => Route::NotFound {
                path: path.to_string(),
            },
        };
        Ok(route)
    }
}

fn parse_query<T>(uri: &Uri) -> Result<T, RouteError>
where
    T: serde::de::DeserializeOwned + Default,
{
    if uri.query().is_none() {
        return Ok(T::default());
    }
    Query::<T>::try_from_uri(uri)
        .map(|Query(query)| query)
        .map_err(|e| RouteError::Query(e.body_text()))
}

// ═══════════════════════════════════════════════════════════
// Views
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: &'static str,
    pub href: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    #[serde(rename_all = "camelCase")]
    Home {
        hospital_count: usize,
        doctor_count: usize,
        search_path: &'static str,
    },
    #[serde(rename_all = "camelCase")]
    HospitalList {
        hospitals: Vec<Hospital>,
        count: usize,
        /// Query string to mirror into the address bar.
        address_bar: String,
        specializations: Vec<String>,
        insurance_options: Vec<String>,
    },
    HospitalDetail {
        hospital: Hospital,
        doctors: Vec<Doctor>,
    },
    #[serde(rename_all = "camelCase")]
    DoctorList {
        doctors: Vec<Doctor>,
        count: usize,
        specializations: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    DoctorDetail {
        doctor: Doctor,
        booking_open: bool,
        /// Booking was requested but nobody is logged in.
        login_prompt: bool,
        time_slots: &'static [&'static str],
        booking_form: BookingRequest,
    },
    Appointments(AppointmentBuckets),
    Dashboard(DashboardView),
    Login,
    Register {
        roles: Vec<Role>,
    },
    NotFound {
        title: &'static str,
        message: &'static str,
        back: Link,
    },
    AccessRestricted {
        title: &'static str,
        message: &'static str,
        restriction: Restriction,
        link: Link,
    },
}

impl View {
    pub fn is_not_found(&self) -> bool {
        matches!(self, View::NotFound { .. })
    }

    pub fn is_access_restricted(&self) -> bool {
        matches!(self, View::AccessRestricted { .. })
    }

    pub fn page_not_found() -> Self {
        View::NotFound {
            title: "Page Not Found",
            message: "The page you're looking for doesn't exist or has been moved.",
            back: Link {
                label: "Return to Home",
                href: "/",
            },
        }
    }

    fn hospital_not_found() -> Self {
        View::NotFound {
            title: "Hospital Not Found",
            message: "The hospital you're looking for doesn't exist.",
            back: Link {
                label: "Back to Hospitals",
                href: "/hospitals",
            },
        }
    }

    fn doctor_not_found() -> Self {
        View::NotFound {
            title: "Doctor Not Found",
            message: "The doctor you're looking for doesn't exist.",
            back: Link {
                label: "Back to Doctors",
                href: "/doctors",
            },
        }
    }
}

fn owned(values: Vec<&str>) -> Vec<String> {
    values.into_iter().map(str::to_string).collect()
}

// ═══════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════

pub fn render(route: &Route, session: &Session, catalog: &Catalog) -> Result<View, FilterError> {
    let view = match route {
        Route::Home => View::Home {
            hospital_count: catalog.hospitals().len(),
            doctor_count: catalog.doctors().len(),
            search_path: "/hospitals",
        },

        Route::Hospitals(query) => {
            let hospitals: Vec<Hospital> =
                query.search(catalog.hospitals())?.into_iter().cloned().collect();
            View::HospitalList {
                count: hospitals.len(),
                hospitals,
                address_bar: query.address_bar(),
                specializations: owned(catalog.hospital_specializations()),
                insurance_options: owned(catalog.insurance_options()),
            }
        }

        Route::Hospital { id } => match catalog.hospital(id) {
            Some(hospital) => View::HospitalDetail {
                hospital: hospital.clone(),
                doctors: catalog.doctors_at(id).into_iter().cloned().collect(),
            },
            None => View::hospital_not_found(),
        },

        Route::Doctors(query) => {
            let doctors: Vec<Doctor> =
                query.search(catalog.doctors())?.into_iter().cloned().collect();
            View::DoctorList {
                count: doctors.len(),
                doctors,
                specializations: owned(catalog.doctor_specializations()),
            }
        }

        Route::Doctor { id, book } => match catalog.doctor(id) {
            Some(doctor) => View::DoctorDetail {
                doctor: doctor.clone(),
                booking_open: *book && session.is_authenticated(),
                login_prompt: *book && !session.is_authenticated(),
                time_slots: TIME_SLOTS,
                booking_form: BookingRequest::prefilled(session.user()),
            },
            None => View::doctor_not_found(),
        },

        Route::Appointments => match session.require_login() {
            // Every patient sees the demo appointment list
            Access::Granted(_) => {
                View::Appointments(AppointmentBuckets::from_appointments(catalog.appointments()))
            }
            Access::Restricted(restriction) => View::AccessRestricted {
                title: "Please Log In",
                message: "You need to be logged in to view your appointments.",
                restriction,
                link: Link {
                    label: "Log In",
                    href: "/login",
                },
            },
        },

        Route::Dashboard => match session.authorize(Role::Hospital) {
            Access::Granted(user) => match DashboardView::for_user(catalog, user) {
                Some(dashboard) => View::Dashboard(dashboard),
                None => View::hospital_not_found(),
            },
            Access::Restricted(restriction) => View::AccessRestricted {
                title: "Access Restricted",
                message: "This dashboard is only available for hospital administrators.",
                restriction,
                link: Link {
                    label: "Go Home",
                    href: "/",
                },
            },
        },

        Route::Login => View::Login,

        Route::Register => View::Register {
            roles: vec![Role::Patient, Role::Hospital],
        },

        Route::NotFound { path } => {
            tracing::debug!(%path, "No route matched");
            View::page_not_found()
        }
    };
    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Credentials, DemoAuthenticator};

    fn route(location: &str) -> Route {
        let uri: Uri = location.parse().unwrap();
        Route::from_uri(&uri).unwrap()
    }

    fn session_for(email: Option<&str>) -> Session {
        let mut session = Session::anonymous();
        if let Some(email) = email {
            session
                .login(
                    &DemoAuthenticator,
                    &Credentials {
                        email: email.into(),
                        password: String::new(),
                    },
                )
                .unwrap();
        }
        session
    }

    fn show(location: &str, email: Option<&str>) -> View {
        let catalog = Catalog::seeded().unwrap();
        render(&route(location), &session_for(email), &catalog).unwrap()
    }

    // ───────────────────────────────────────
    // Route parsing
    // ───────────────────────────────────────

    #[test]
    fn parses_static_routes() {
        assert_eq!(route("/"), Route::Home);
        assert_eq!(route("/appointments"), Route::Appointments);
        assert_eq!(route("/dashboard/"), Route::Dashboard);
        assert_eq!(route("/login"), Route::Login);
        assert_eq!(route("/register"), Route::Register);
    }

    #[test]
    fn parses_detail_routes_and_book_flag() {
        assert_eq!(route("/hospitals/2"), Route::Hospital { id: "2".into() });
        assert_eq!(
            route("/doctors/1?book=true"),
            Route::Doctor {
                id: "1".into(),
                book: true
            }
        );
        assert_eq!(
            route("/doctors/1?book=yes"),
            Route::Doctor {
                id: "1".into(),
                book: false
            }
        );
    }

    #[test]
    fn parses_list_queries() {
        match route("/hospitals?search=city&location=New%20York") {
            Route::Hospitals(query) => {
                assert_eq!(query.search.as_deref(), Some("city"));
                assert_eq!(query.location.as_deref(), Some("New York"));
            }
            other => panic!("Expected hospital list, got {other:?}"),
        }
        match route("/doctors?specialization=Cardiology&minRating=4.5") {
            Route::Doctors(query) => {
                assert_eq!(query.min_rating.as_deref(), Some("4.5"));
            }
            other => panic!("Expected doctor list, got {other:?}"),
        }
    }

    #[test]
    fn unknown_paths_fall_through_to_not_found() {
        assert_eq!(
            route("/doctors/1/reviews"),
            Route::NotFound {
                path: "/doctors/1/reviews".into()
            }
        );
        assert!(matches!(route("/pharmacy"), Route::NotFound { .. }));
    }

    // ───────────────────────────────────────
    // Rendering
    // ───────────────────────────────────────

    #[test]
    fn missing_doctor_links_back_to_list() {
        match show("/doctors/999", None) {
            View::NotFound { title, back, .. } => {
                assert_eq!(title, "Doctor Not Found");
                assert_eq!(back.href, "/doctors");
            }
            other => panic!("Expected not found, got {other:?}"),
        }
    }

    #[test]
    fn missing_hospital_links_back_to_list() {
        match show("/hospitals/0", Some("patient@demo.com")) {
            View::NotFound { back, .. } => assert_eq!(back.href, "/hospitals"),
            other => panic!("Expected not found, got {other:?}"),
        }
    }

    #[test]
    fn dashboard_is_restricted_for_anonymous_and_patients() {
        for email in [None, Some("patient@demo.com")] {
            let view = show("/dashboard", email);
            assert!(view.is_access_restricted(), "{email:?} saw {view:?}");
        }
    }

    #[test]
    fn dashboard_shows_for_hospital_accounts() {
        match show("/dashboard", Some("hospital@demo.com")) {
            View::Dashboard(dashboard) => assert_eq!(dashboard.hospital.id, "1"),
            other => panic!("Expected dashboard, got {other:?}"),
        }
    }

    #[test]
    fn appointments_need_login() {
        match show("/appointments", None) {
            View::AccessRestricted {
                restriction, link, ..
            } => {
                assert_eq!(restriction, Restriction::LoginRequired);
                assert_eq!(link.href, "/login");
            }
            other => panic!("Expected restricted, got {other:?}"),
        }
        match show("/appointments", Some("patient@demo.com")) {
            View::Appointments(buckets) => {
                assert_eq!(buckets.upcoming.len(), 1);
                assert_eq!(buckets.past.len(), 1);
            }
            other => panic!("Expected appointments, got {other:?}"),
        }
    }

    #[test]
    fn booking_dialog_opens_only_when_logged_in() {
        match show("/doctors/2?book=true", Some("patient@demo.com")) {
            View::DoctorDetail {
                booking_open,
                login_prompt,
                booking_form,
                ..
            } => {
                assert!(booking_open);
                assert!(!login_prompt);
                assert_eq!(booking_form.email, "patient@demo.com");
            }
            other => panic!("Expected doctor detail, got {other:?}"),
        }
        match show("/doctors/2?book=true", None) {
            View::DoctorDetail {
                booking_open,
                login_prompt,
                ..
            } => {
                assert!(!booking_open);
                assert!(login_prompt);
            }
            other => panic!("Expected doctor detail, got {other:?}"),
        }
    }

    #[test]
    fn doctor_list_applies_filters() {
        match show("/doctors?specialization=Cardiology&minRating=4.5", None) {
            View::DoctorList { doctors, count, .. } => {
                assert_eq!(count, 1);
                assert_eq!(doctors[0].name, "Dr. Sarah Williams");
            }
            other => panic!("Expected doctor list, got {other:?}"),
        }
    }

    #[test]
    fn hospital_list_round_trips_search_box() {
        match show("/hospitals?search=health&location=chicago&minRating=4", None) {
            View::HospitalList {
                hospitals,
                address_bar,
                ..
            } => {
                assert_eq!(hospitals.len(), 1);
                assert_eq!(hospitals[0].id, "3");
                assert_eq!(address_bar, "search=health&location=chicago");
            }
            other => panic!("Expected hospital list, got {other:?}"),
        }
    }

    #[test]
    fn malformed_filter_is_an_error() {
        let catalog = Catalog::seeded().unwrap();
        let result = render(
            &route("/doctors?maxFee=lots"),
            &Session::anonymous(),
            &catalog,
        );
        assert!(result.is_err());
    }

    #[test]
    fn views_serialize_with_tag() {
        let json = serde_json::to_value(show("/nowhere", None)).unwrap();
        assert_eq!(json["view"], "not_found");
        assert_eq!(json["back"]["href"], "/");

        let json = serde_json::to_value(show("/register", None)).unwrap();
        assert_eq!(json["view"], "register");
        assert_eq!(json["roles"], serde_json::json!(["patient", "hospital"]));

        let json = serde_json::to_value(show("/doctors/1", None)).unwrap();
        assert_eq!(json["view"], "doctor_detail");
        assert_eq!(json["bookingOpen"], false);
        assert_eq!(json["doctor"]["consultationFee"], 200);
    }
}
