//! Integration tests for cart operations through the terminal's form routes.

use std::sync::{Arc, Mutex};

use axum::http::StatusCode;

use till_core::{Cart, CheckoutHook, Price};
use till_integration_tests::{TestResponse, TestTerminal};

fn cart_lines(body: &str) -> Vec<(String, String)> {
    body.split("<p class=\"line-name\">")
        .skip(1)
        .filter_map(|chunk| {
            let name = chunk.split("</p>").next()?;
            let qty = chunk
                .split("<p class=\"line-qty\">")
                .nth(1)?
                .split("</p>")
                .next()?;
            Some((name.to_string(), qty.to_string()))
        })
        .collect()
}

async fn add(terminal: &mut TestTerminal, id: &str) -> TestResponse {
    terminal
        .post_form("/cart/add", &format!("product_id={id}&category=all"))
        .await
}

fn assert_redirects_to(response: &TestResponse, location: &str) {
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some(location));
}

#[tokio::test]
async fn test_add_same_product_twice() {
    let mut terminal = TestTerminal::new();

    let response = add(&mut terminal, "1").await;
    assert_redirects_to(&response, "/");
    add(&mut terminal, "1").await;

    let screen = terminal.get("/").await;
    assert_eq!(
        cart_lines(&screen.body),
        [("Espresso".to_string(), "2 × KSh 180".to_string())]
    );
    assert!(screen.body.contains("<p class=\"line-total\">KSh 360</p>"));
    assert!(screen.body.contains("Total: KSh 360"));
}

#[tokio::test]
async fn test_total_across_lines() {
    let mut terminal = TestTerminal::new();

    add(&mut terminal, "1").await;
    add(&mut terminal, "2").await;
    add(&mut terminal, "2").await;

    let screen = terminal.get("/").await;
    assert!(screen.body.contains("Total: KSh 680"));
}

#[tokio::test]
async fn test_lines_keep_first_added_order() {
    let mut terminal = TestTerminal::new();

    add(&mut terminal, "2").await;
    add(&mut terminal, "1").await;
    add(&mut terminal, "2").await;

    let screen = terminal.get("/").await;
    assert_eq!(
        cart_lines(&screen.body),
        [
            ("Cappuccino".to_string(), "2 × KSh 250".to_string()),
            ("Espresso".to_string(), "1 × KSh 180".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_add_redirects_back_to_category() {
    let mut terminal = TestTerminal::new();

    let response = terminal
        .post_form("/cart/add", "product_id=4&category=bakery")
        .await;
    assert_redirects_to(&response, "/?category=bakery");

    // The cart is not filtered by the catalog category.
    let screen = terminal.get("/?category=coffee").await;
    assert_eq!(
        cart_lines(&screen.body),
        [("Croissant".to_string(), "1 × KSh 220".to_string())]
    );
}

#[tokio::test]
async fn test_add_unknown_product_is_not_found() {
    let mut terminal = TestTerminal::new();

    let response = add(&mut terminal, "99").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = terminal.post_form("/cart/add", "product_id=").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_remove_line() {
    let mut terminal = TestTerminal::new();

    add(&mut terminal, "1").await;
    add(&mut terminal, "1").await;
    add(&mut terminal, "3").await;

    let response = terminal
        .post_form("/cart/remove", "product_id=1&category=coffee")
        .await;
    assert_redirects_to(&response, "/?category=coffee");

    let screen = terminal.get("/").await;
    assert_eq!(
        cart_lines(&screen.body),
        [("Latte".to_string(), "1 × KSh 280".to_string())]
    );
    assert!(screen.body.contains("Total: KSh 280"));
}

#[tokio::test]
async fn test_remove_absent_product_is_noop() {
    let mut terminal = TestTerminal::new();

    add(&mut terminal, "2").await;
    add(&mut terminal, "1").await;
    let before = cart_lines(&terminal.get("/").await.body);

    let response = terminal
        .post_form("/cart/remove", "product_id=12&category=all")
        .await;
    assert_redirects_to(&response, "/");
    let response = terminal.post_form("/cart/remove", "product_id=nope").await;
    assert_redirects_to(&response, "/");

    let after = terminal.get("/").await;
    assert_eq!(cart_lines(&after.body), before);
    assert!(after.body.contains("Total: KSh 430"));
}

#[tokio::test]
async fn test_carts_are_per_session() {
    let mut first = TestTerminal::new();
    let mut second = first.other_browser();

    add(&mut first, "8").await;

    let screen = second.get("/").await;
    assert!(cart_lines(&screen.body).is_empty());
    assert!(screen.body.contains("Total: KSh 0"));

    let screen = first.get("/").await;
    assert!(screen.body.contains("Total: KSh 2400"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_simultaneous_adds_in_one_session_all_count() {
    let mut terminal = TestTerminal::new();
    add(&mut terminal, "1").await;

    let tabs: Vec<_> = (0..20)
        .map(|_| {
            let mut tab = terminal.clone();
            tokio::spawn(async move { add(&mut tab, "1").await })
        })
        .collect();
    for tab in tabs {
        let response = tab.await.expect("add task should not panic");
        assert_redirects_to(&response, "/");
    }

    let screen = terminal.get("/").await;
    assert_eq!(
        cart_lines(&screen.body),
        [("Espresso".to_string(), "21 × KSh 180".to_string())]
    );
    assert!(screen.body.contains("Total: KSh 3780"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_simultaneous_adds_of_different_products_keep_every_line() {
    let mut terminal = TestTerminal::new();
    add(&mut terminal, "12").await;

    let tabs: Vec<_> = ["1", "2", "3", "4", "5", "6"]
        .into_iter()
        .map(|id| {
            let mut tab = terminal.clone();
            tokio::spawn(async move { add(&mut tab, id).await })
        })
        .collect();
    for tab in tabs {
        tab.await.expect("add task should not panic");
    }

    let screen = terminal.get("/").await;
    let lines = cart_lines(&screen.body);
    assert_eq!(lines.len(), 7);
    assert_eq!(lines.first().map(|(name, _)| name.as_str()), Some("Granola"));
    assert!(lines.iter().all(|(_, qty)| qty.starts_with("1 × ")));
    // 540 + 180 + 250 + 280 + 220 + 200 + 320
    assert!(screen.body.contains("Total: KSh 1990"));
}

#[tokio::test]
async fn test_checkout_leaves_cart_unchanged() {
    let mut terminal = TestTerminal::new();

    add(&mut terminal, "10").await;
    add(&mut terminal, "11").await;

    let response = terminal
        .post_form("/checkout", "category=groceries")
        .await;
    assert_redirects_to(&response, "/?category=groceries");

    let screen = terminal.get("/").await;
    assert_eq!(cart_lines(&screen.body).len(), 2);
    assert!(screen.body.contains("Total: KSh 500"));
}

#[derive(Clone, Default)]
struct RecordingCheckout {
    totals: Arc<Mutex<Vec<Price>>>,
}

impl CheckoutHook for RecordingCheckout {
    fn checkout(&self, cart: &Cart) {
        self.totals
            .lock()
            .expect("lock not poisoned")
            .push(cart.total());
    }
}

#[tokio::test]
async fn test_checkout_runs_hook_with_session_cart() {
    let hook = RecordingCheckout::default();
    let totals = Arc::clone(&hook.totals);
    let mut terminal = TestTerminal::with_checkout(hook);

    terminal.post_form("/checkout", "category=all").await;
    add(&mut terminal, "12").await;
    terminal.post_form("/checkout", "category=all").await;

    let totals = totals.lock().expect("lock not poisoned");
    assert_eq!(*totals, [Price::kes(0), Price::kes(540)]);
}
