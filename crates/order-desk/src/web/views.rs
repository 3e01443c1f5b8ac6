//! Server-rendered HTML.

use super::flash::Flash;
use super::outcome::Page;
use crate::model::{Customer, CustomerParams, FieldValue, Order, OrderParams, ValidationErrors};
use std::fmt::Write;

pub fn render(page: &Page, flash: Option<&Flash>) -> String {
    let (title, body) = match page {
        Page::OrderIndex { orders } => ("Orders", order_index(orders)),
        Page::OrderShow { order } => ("Order", order_show(order)),
        Page::OrderNew {
            form,
            customers,
            errors,
        } => (
            "New Order",
            order_form("/orders", None, form, customers, errors, "Create Order"),
        ),
        Page::OrderEdit {
            id,
            form,
            customers,
            errors,
        } => (
            "Editing Order",
            order_form(&format!("/orders/{}", id), Some("patch"), form, customers, errors, "Update Order"),
        ),
        Page::CustomerIndex { customers } => ("Customers", customer_index(customers)),
        Page::CustomerShow { customer, orders } => ("Customer", customer_show(customer, orders)),
        Page::CustomerNew { form, errors } => (
            "New Customer",
            customer_form("/customers", None, form, errors, "Create Customer"),
        ),
        Page::CustomerEdit { id, form, errors } => (
            "Editing Customer",
            customer_form(&format!("/customers/{}", id), Some("patch"), form, errors, "Update Customer"),
        ),
    };
    layout(title, flash, &body)
}

fn layout(title: &str, flash: Option<&Flash>, body: &str) -> String {
    let flash = flash
        .map(|f| format!("<p class=\"{}\">{}</p>\n", f.kind.as_str(), escape(&f.message)))
        .unwrap_or_default();
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title} | Order Desk</title>\n</head>\n<body>\n\
         <nav><a href=\"/customers\">Customers</a> | <a href=\"/orders\">Orders</a></nav>\n\
         {flash}<h1>{title}</h1>\n{body}</body>\n</html>\n",
        title = escape(title),
        flash = flash,
        body = body,
    )
}

/// Escapes text for element content and double- or single-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// A one-button form that tunnels DELETE through POST.
fn delete_button(action: &str, label: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{}\" class=\"button_to\">\
         <input type=\"hidden\" name=\"_method\" value=\"delete\">\
         <button type=\"submit\">{}</button></form>",
        escape(action),
        escape(label)
    )
}

fn error_explanation(errors: &ValidationErrors, record: &str) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let mut html = format!(
        "<div id=\"error_explanation\">\n<h2>{} {} prohibited this {} from being saved:</h2>\n<ul>\n",
        errors.len(),
        if errors.len() == 1 { "error" } else { "errors" },
        record
    );
    for message in errors.full_messages() {
        let _ = writeln!(html, "<li>{}</li>", escape(&message));
    }
    html.push_str("</ul>\n</div>\n");
    html
}

fn method_field(method: Option<&str>) -> String {
    method
        .map(|m| format!("<input type=\"hidden\" name=\"_method\" value=\"{}\">\n", m))
        .unwrap_or_default()
}

fn field_text(value: Option<&FieldValue>) -> String {
    value.map(FieldValue::to_string).unwrap_or_default()
}

fn order_index(orders: &[Order]) -> String {
    let mut html = String::from(
        "<table>\n<thead><tr><th>Product name</th><th>Product count</th><th>Customer</th><th colspan=\"3\"></th></tr></thead>\n<tbody>\n",
    );
    for order in orders {
        let path = format!("/orders/{}", order.id);
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td><a href=\"/customers/{cid}\">{cid}</a></td>\
             <td><a href=\"{path}\">Show</a></td><td><a href=\"{path}/edit\">Edit</a></td><td>{}</td></tr>",
            escape(&order.product_name),
            order.product_count,
            delete_button(&path, "Destroy"),
            cid = order.customer_id,
            path = path,
        );
    }
    html.push_str("</tbody>\n</table>\n<p><a href=\"/orders/new\">New Order</a></p>\n");
    html
}

fn order_show(order: &Order) -> String {
    let path = format!("/orders/{}", order.id);
    format!(
        "<p><strong>Product name:</strong> {}</p>\n\
         <p><strong>Product count:</strong> {}</p>\n\
         <p><strong>Customer:</strong> <a href=\"/customers/{cid}\">{cid}</a></p>\n\
         <p><a href=\"{path}/edit\">Edit</a> | <a href=\"/orders\">Back</a></p>\n{}\n",
        escape(&order.product_name),
        order.product_count,
        delete_button(&path, "Destroy"),
        cid = order.customer_id,
        path = path,
    )
}

fn order_form(
    action: &str,
    method: Option<&str>,
    form: &OrderParams,
    customers: &[Customer],
    errors: &ValidationErrors,
    submit: &str,
) -> String {
    let selected = field_text(form.customer_id.as_ref());
    let mut options = String::from("<option value=\"\">Select a customer</option>\n");
    for customer in customers {
        let id = customer.id.to_string();
        let _ = writeln!(
            options,
            "<option value=\"{}\"{}>{}</option>",
            id,
            if id == selected.trim() { " selected" } else { "" },
            escape(&customer.full_name())
        );
    }

    format!(
        "{errors}<form method=\"post\" action=\"{action}\">\n{method}\
         <p><label for=\"order_product_name\">Product name</label>\n\
         <input type=\"text\" id=\"order_product_name\" name=\"order[product_name]\" value=\"{name}\"></p>\n\
         <p><label for=\"order_product_count\">Product count</label>\n\
         <input type=\"number\" id=\"order_product_count\" name=\"order[product_count]\" value=\"{count}\"></p>\n\
         <p><label for=\"order_customer_id\">Customer</label>\n\
         <select id=\"order_customer_id\" name=\"order[customer_id]\">\n{options}</select></p>\n\
         <p><button type=\"submit\">{submit}</button></p>\n</form>\n\
         <p><a href=\"/orders\">Back</a></p>\n",
        errors = error_explanation(errors, "order"),
        action = escape(action),
        method = method_field(method),
        name = escape(&field_text(form.product_name.as_ref())),
        count = escape(&field_text(form.product_count.as_ref())),
        options = options,
        submit = escape(submit),
    )
}

fn customer_index(customers: &[Customer]) -> String {
    let mut html = String::from(
        "<table>\n<thead><tr><th>First name</th><th>Last name</th><th>Phone</th><th>Email</th><th colspan=\"3\"></th></tr></thead>\n<tbody>\n",
    );
    for customer in customers {
        let path = format!("/customers/{}", customer.id);
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td><a href=\"{path}\">Show</a></td><td><a href=\"{path}/edit\">Edit</a></td><td>{}</td></tr>",
            escape(&customer.first_name),
            escape(&customer.last_name),
            escape(&customer.phone),
            escape(&customer.email),
            delete_button(&path, "Destroy"),
            path = path,
        );
    }
    html.push_str("</tbody>\n</table>\n<p><a href=\"/customers/new\">New Customer</a></p>\n");
    html
}

fn customer_show(customer: &Customer, orders: &[Order]) -> String {
    let path = format!("/customers/{}", customer.id);
    let mut html = format!(
        "<p><strong>Name:</strong> {}</p>\n\
         <p><strong>Phone:</strong> {}</p>\n\
         <p><strong>Email:</strong> {}</p>\n\
         <h2>Orders</h2>\n<ul>\n",
        escape(&customer.full_name()),
        escape(&customer.phone),
        escape(&customer.email),
    );
    for order in orders {
        let _ = writeln!(
            html,
            "<li><a href=\"/orders/{}\">{} x {}</a></li>",
            order.id,
            order.product_count,
            escape(&order.product_name)
        );
    }
    let _ = write!(
        html,
        "</ul>\n<p><a href=\"{path}/edit\">Edit</a> | <a href=\"/customers\">Back</a></p>\n{}\n{}\n",
        delete_button(&path, "Destroy"),
        delete_button(
            &format!("/customers/customerAndOrders/{}", customer.id),
            "Delete customer if no orders"
        ),
        path = path,
    );
    html
}

fn customer_form(
    action: &str,
    method: Option<&str>,
    form: &CustomerParams,
    errors: &ValidationErrors,
    submit: &str,
) -> String {
    let mut html = error_explanation(errors, "customer");
    let _ = write!(
        html,
        "<form method=\"post\" action=\"{}\">\n{}",
        escape(action),
        method_field(method)
    );
    for (field, label, value) in [
        ("first_name", "First name", &form.first_name),
        ("last_name", "Last name", &form.last_name),
        ("phone", "Phone", &form.phone),
        ("email", "Email", &form.email),
    ] {
        let _ = writeln!(
            html,
            "<p><label for=\"customer_{field}\">{label}</label>\n\
             <input type=\"text\" id=\"customer_{field}\" name=\"customer[{field}]\" value=\"{}\"></p>",
            escape(value.as_deref().unwrap_or_default()),
            field = field,
            label = label,
        );
    }
    let _ = write!(
        html,
        "<p><button type=\"submit\">{}</button></p>\n</form>\n<p><a href=\"/customers\">Back</a></p>\n",
        escape(submit)
    );
    html
}
