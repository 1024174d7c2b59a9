//! End-to-end runs of the close procedure.
//!
//! Each test describes the action inputs and what the fake GitHub answers,
//! runs `close::run` with a real `GithubClient`, and checks the requests
//! received and what was reported to the host.

use super::common::{Events, MapHost, Method, Response, TestBuilder};
use close_issue::close::{self, Outcome};
use close_issue::github::GithubClient;
use serde_json::json;

const COMMENTS: &str = "repos/o/r/issues/5/comments";
const ISSUE: &str = "repos/o/r/issues/5";

fn inputs<'a>(
    close_reason: &'a str,
    comment: &'a str,
    labels: &'a str,
) -> [(&'static str, &'a str); 6] {
    [
        ("token", "t"),
        ("repository", "o/r"),
        ("issue-number", "5"),
        ("close-reason", close_reason),
        ("comment", comment),
        ("labels", labels),
    ]
}

fn comment_created(_: &super::common::Request) -> Response {
    Response::json(
        201,
        json!({"id": 7, "html_url": "https://github.com/o/r/issues/5#issuecomment-7"}),
    )
}

fn issue_closed(req: &super::common::Request) -> Response {
    let body = req.json();
    Response::json(
        200,
        json!({
            "number": 5,
            "html_url": "https://github.com/o/r/issues/5",
            "state": body["state"],
            "state_reason": body["state_reason"],
            "labels": body["labels"]
                .as_array()
                .map(|labels| labels.iter().map(|l| json!({"name": l})).collect::<Vec<_>>())
                .unwrap_or_default(),
        }),
    )
}

fn run_test(builder: TestBuilder, host: &MapHost) -> (Outcome, Events) {
    let (server, events) = builder.build();
    let api_url = server.api_url();
    let outcome = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(close::run(host, |inputs| {
            Ok(GithubClient::new(inputs.token.clone(), api_url))
        }));
    outcome.report(host);
    (outcome, events)
}

#[test]
fn comment_close_and_label() {
    let host = MapHost::new(&inputs("not_planned", "done", "bug,wontfix"));
    let builder = TestBuilder::default()
        .api_handler(Method::POST, COMMENTS, comment_created)
        .api_handler(Method::PATCH, ISSUE, issue_closed);
    let (outcome, events) = run_test(builder, &host);

    assert_eq!(outcome, Outcome::Succeeded);
    events.assert_eq(&[
        (Method::POST, "/repos/o/r/issues/5/comments"),
        (Method::PATCH, "/repos/o/r/issues/5"),
    ]);
    let requests = events.requests();
    assert_eq!(requests[0].json(), json!({"body": "done"}));
    assert_eq!(
        requests[1].json(),
        json!({"state": "closed", "state_reason": "not_planned", "labels": ["bug", "wontfix"]})
    );
    assert_eq!(requests[1].headers["authorization"], "token t");
    assert_eq!(
        host.info_lines(),
        [
            "Adding a comment before closing the issue",
            "Closing the issue as not_planned",
            "Closed https://github.com/o/r/issues/5",
        ]
    );
    assert!(host.failures().is_empty());
}

#[test]
fn close_only() {
    let host = MapHost::new(&inputs("completed", "", ""));
    let builder = TestBuilder::default().api_handler(Method::PATCH, ISSUE, issue_closed);
    let (outcome, events) = run_test(builder, &host);

    assert!(outcome.is_success());
    events.assert_eq(&[(Method::PATCH, "/repos/o/r/issues/5")]);
    assert_eq!(
        events.requests()[0].json(),
        json!({"state": "closed", "state_reason": "completed"})
    );
}

#[test]
fn rejected_comment_leaves_issue_open() {
    let host = MapHost::new(&inputs("completed", "done", ""));
    let builder = TestBuilder::default()
        .api_handler(Method::POST, COMMENTS, |_| {
            Response::json(
                403,
                json!({
                    "message": "Resource not accessible by integration",
                    "documentation_url": "https://docs.github.com/rest/issues/comments#create-an-issue-comment",
                }),
            )
        })
        .api_handler(Method::PATCH, ISSUE, issue_closed);
    let (outcome, events) = run_test(builder, &host);

    assert!(!outcome.is_success());
    events.assert_eq(&[(Method::POST, "/repos/o/r/issues/5/comments")]);
    assert_eq!(
        host.failures(),
        ["Resource not accessible by integration - https://docs.github.com/rest/issues/comments#create-an-issue-comment"]
    );
    assert_eq!(host.info_lines(), ["Adding a comment before closing the issue"]);
}

#[test]
fn failed_close_keeps_the_comment() {
    let host = MapHost::new(&inputs("completed", "done", ""));
    let builder = TestBuilder::default()
        .api_handler(Method::POST, COMMENTS, comment_created)
        .api_handler(Method::PATCH, ISSUE, |_| {
            Response::text(502, "upstream unavailable")
        });
    let (_, events) = run_test(builder, &host);

    events.assert_eq(&[
        (Method::POST, "/repos/o/r/issues/5/comments"),
        (Method::PATCH, "/repos/o/r/issues/5"),
    ]);
    assert_eq!(host.failures(), ["upstream unavailable"]);
    let debug = host.debug.lock().unwrap();
    assert!(debug.last().unwrap().starts_with("upstream unavailable"));
}

#[test]
fn missing_issue() {
    let host = MapHost::new(&inputs("completed", "", ""));
    let (_, events) = run_test(TestBuilder::default(), &host);

    events.assert_eq(&[(Method::PATCH, "/repos/o/r/issues/5")]);
    assert_eq!(host.failures(), ["Not Found"]);
}

#[test]
fn malformed_repository_fails_before_any_request() {
    let mut inputs = inputs("completed", "done", "bug");
    inputs[1] = ("repository", "o");
    let host = MapHost::new(&inputs);
    let (_, events) = run_test(TestBuilder::default(), &host);

    events.assert_eq(&[]);
    assert_eq!(
        host.failures(),
        ["invalid repository \"o\", expected \"owner/name\""]
    );
}
