//! What a controller decided, independent of how it is written to the wire.
//!
//! Controllers return an [`Outcome`]; [`Outcome::respond`] turns it into an HTML page,
//! a 303 redirect with a flash cookie, or the JSON equivalent.

use super::flash::{Flash, CLEAR_COOKIE};
use super::request::Format;
use super::views;
use crate::model::{Customer, CustomerId, CustomerParams, Order, OrderId, OrderParams, ValidationErrors};
use axum::http::header::{LOCATION, SET_COOKIE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Json, Redirect, Response};
use serde_json::{json, Value};

/// A view and the data it shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    OrderIndex {
        orders: Vec<Order>,
    },
    OrderShow {
        order: Order,
    },
    OrderNew {
        form: OrderParams,
        customers: Vec<Customer>,
        errors: ValidationErrors,
    },
    OrderEdit {
        id: OrderId,
        form: OrderParams,
        customers: Vec<Customer>,
        errors: ValidationErrors,
    },
    CustomerIndex {
        customers: Vec<Customer>,
    },
    CustomerShow {
        customer: Customer,
        orders: Vec<Order>,
    },
    CustomerNew {
        form: CustomerParams,
        errors: ValidationErrors,
    },
    CustomerEdit {
        id: CustomerId,
        form: CustomerParams,
        errors: ValidationErrors,
    },
}

impl Page {
    /// Forms answer with their errors when there are any, otherwise with the blank or
    /// current attributes.
    fn to_json(&self) -> Value {
        match self {
            Page::OrderIndex { orders } => json!(orders),
            Page::OrderShow { order } => json!(order),
            Page::OrderNew { form, errors, .. } | Page::OrderEdit { form, errors, .. } => {
                if errors.is_empty() {
                    json!(form)
                } else {
                    json!(errors)
                }
            }
            Page::CustomerIndex { customers } => json!(customers),
            Page::CustomerShow { customer, .. } => json!(customer),
            Page::CustomerNew { form, errors } | Page::CustomerEdit { form, errors, .. } => {
                if errors.is_empty() {
                    json!(form)
                } else {
                    json!(errors)
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Show a page.
    Render { page: Page, status: StatusCode },
    /// A create or update went through. HTML redirects with `notice`; JSON returns the record.
    Saved {
        location: String,
        notice: &'static str,
        record: Value,
        status: StatusCode,
    },
    /// A delete went through. HTML redirects with `notice`; JSON answers 204.
    Removed {
        location: String,
        notice: &'static str,
    },
    /// Redirect in every format: missing records and refused deletions.
    Redirect { location: String, flash: Flash },
    /// The payload root (`order`, `customer`) was absent or empty.
    MissingParams(&'static str),
}

impl Outcome {
    pub fn page(page: Page) -> Self {
        Outcome::Render {
            page,
            status: StatusCode::OK,
        }
    }

    /// Re-render a form that failed validation.
    pub fn invalid(page: Page) -> Self {
        Outcome::Render {
            page,
            status: StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    pub fn redirect(location: impl Into<String>, flash: Flash) -> Self {
        Outcome::Redirect {
            location: location.into(),
            flash,
        }
    }

    /// Writes the outcome in `format`. A rendered HTML page displays and clears `pending`.
    pub fn respond(self, format: Format, pending: Option<Flash>) -> Response {
        match (self, format) {
            (Outcome::Render { page, status }, Format::Html) => {
                let mut response = (status, Html(views::render(&page, pending.as_ref()))).into_response();
                if pending.is_some() {
                    response
                        .headers_mut()
                        .append(SET_COOKIE, HeaderValue::from_static(CLEAR_COOKIE));
                }
                response
            }
            (Outcome::Render { page, status }, Format::Json) => {
                (status, Json(page.to_json())).into_response()
            }
            (Outcome::Saved { location, notice, .. }, Format::Html)
            | (Outcome::Removed { location, notice }, Format::Html) => {
                see_other(&location, &Flash::notice(notice))
            }
            (
                Outcome::Saved {
                    location,
                    record,
                    status,
                    ..
                },
                Format::Json,
            ) => (status, [(LOCATION, location)], Json(record)).into_response(),
            (Outcome::Removed { .. }, Format::Json) => StatusCode::NO_CONTENT.into_response(),
            (Outcome::Redirect { location, flash }, _) => see_other(&location, &flash),
            (Outcome::MissingParams(root), _) => (
                StatusCode::BAD_REQUEST,
                format!("param is missing or the value is empty: {}", root),
            )
                .into_response(),
        }
    }
}

fn see_other(location: &str, flash: &Flash) -> Response {
    ([(SET_COOKIE, flash.set_cookie())], Redirect::to(location)).into_response()
}
