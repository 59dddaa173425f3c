//! Server-rendered HTML pages

use axum::http::StatusCode;

use crate::models::{PostForm, PostListing, User};

/// Escape text for use in HTML content and quoted attribute values
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn base_style() -> &'static str {
    r#"
body { font-family: sans-serif; background: #eee; padding: 1rem; }
.page { max-width: 960px; margin: 0 auto; background: white; padding: 0 1rem 1rem; }
nav { display: flex; align-items: center; background: lightgray; padding: 0 0.5rem; }
nav h1 { flex: auto; margin: 0; }
nav h1 a { text-decoration: none; padding: 0.25rem 0.5rem; }
nav ul { display: flex; list-style: none; margin: 0; padding: 0; }
nav ul li a, nav ul li span { display: block; padding: 0.5rem; }
.flash { margin: 1em 0; padding: 1em; background: #cae6f6; border: 1px solid #377ba8; }
.post > header { display: flex; align-items: flex-end; }
.post > header > div:first-of-type { flex: auto; }
.post .about { color: slategray; font-style: italic; }
.post .body { white-space: pre-line; }
.content form { display: flex; flex-direction: column; }
.content textarea { min-height: 12em; resize: vertical; }
input.danger { color: #cc2f2e; }
"#
}

fn layout(title: &str, user: Option<&User>, error: Option<&str>, content: &str) -> String {
    let nav_links = match user {
        Some(user) => format!(
            r#"<li><span>{username}</span></li><li><a href="/auth/logout">Log Out</a></li>"#,
            username = escape(&user.username),
        ),
        None => r#"<li><a href="/auth/register">Register</a></li><li><a href="/auth/login">Log In</a></li>"#
            .to_string(),
    };

    let flash = error
        .map(|e| format!(r#"<div class="flash">{}</div>"#, escape(e)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en"><head>
<meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1">
<title>{title} - Blog</title>
<style>{style}</style>
</head><body>
<nav>
  <h1><a href="/">Blog</a></h1>
  <ul>{nav_links}</ul>
</nav>
<section class="page content">
  <header><h1>{title}</h1></header>
  {flash}
  {content}
</section>
</body></html>"#,
        title = escape(title),
        style = base_style(),
    )
}

/// Landing page: every post, with edit links on the viewer's own posts
pub fn index_page(user: Option<&User>, posts: &[PostListing]) -> String {
    let mut content = String::new();

    if user.is_some() {
        content.push_str(r#"<p><a class="action" href="/create">New</a></p>"#);
    }

    for (i, listing) in posts.iter().enumerate() {
        if i > 0 {
            content.push_str("<hr>");
        }

        let post = &listing.post;
        let edit_link = match user {
            Some(user) if user.id == post.author_id => {
                format!(r#"<a class="action" href="/{}/update">Edit</a>"#, post.id)
            }
            _ => String::new(),
        };

        content.push_str(&format!(
            r#"<article class="post">
  <header>
    <div>
      <h1>{title}</h1>
      <div class="about">by {author} on {created}</div>
    </div>
    {edit_link}
  </header>
  <p class="body">{body}</p>
</article>"#,
            title = escape(&post.title),
            author = escape(&listing.username),
            created = post.created_at.format("%Y-%m-%d"),
            body = escape(&post.body),
        ));
    }

    layout("Posts", user, None, &content)
}

fn credentials_form(action: &str, username: &str, submit: &str) -> String {
    format!(
        r#"<form method="post" action="{action}">
    <label for="username">Username</label>
    <input name="username" id="username" value="{username}" required>
    <label for="password">Password</label>
    <input type="password" name="password" id="password" required>
    <input type="submit" value="{submit}">
  </form>"#,
        username = escape(username),
    )
}

pub fn register_page(user: Option<&User>, username: &str, error: Option<&str>) -> String {
    let form = credentials_form("/auth/register", username, "Register");
    layout("Register", user, error, &form)
}

pub fn login_page(user: Option<&User>, username: &str, error: Option<&str>) -> String {
    let form = credentials_form("/auth/login", username, "Log In");
    layout("Log In", user, error, &form)
}

fn post_form(action: &str, form: &PostForm, submit: &str) -> String {
    format!(
        r#"<form method="post" action="{action}">
    <label for="title">Title</label>
    <input name="title" id="title" value="{title}" required>
    <label for="body">Body</label>
    <textarea name="body" id="body">{body}</textarea>
    <input type="submit" value="{submit}">
  </form>"#,
        title = escape(&form.title),
        body = escape(&form.body),
    )
}

pub fn create_page(user: &User, form: &PostForm, error: Option<&str>) -> String {
    let content = post_form("/create", form, "Save");
    layout("New Post", Some(user), error, &content)
}

pub fn update_page(user: &User, post_id: i64, form: &PostForm, error: Option<&str>) -> String {
    let mut content = post_form(&format!("/{post_id}/update"), form, "Save");
    content.push_str(&format!(
        r#"
  <hr>
  <form action="/{post_id}/delete" method="post">
    <input class="danger" type="submit" value="Delete" onclick="return confirm('Are you sure?');">
  </form>"#
    ));

    let title = format!("Edit \"{}\"", form.title);
    layout(&title, Some(user), error, &content)
}

pub fn error_page(user: Option<&User>, status: StatusCode, message: &str) -> String {
    let title = status.canonical_reason().unwrap_or("Error");
    let content = format!("<p>{}</p>", escape(message));
    layout(title, user, None, &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Post;
    use chrono::NaiveDate;

    fn user(id: i64, username: &str) -> User {
        User {
            id,
            username: username.to_string(),
            password_hash: "digest".to_string(),
        }
    }

    fn listing(id: i64, author: &User, title: &str) -> PostListing {
        PostListing {
            post: Post {
                id,
                author_id: author.id,
                title: title.to_string(),
                body: "body".to_string(),
                created_at: NaiveDate::from_ymd_opt(2024, 5, 1)
                    .unwrap()
                    .and_hms_opt(12, 0, 0)
                    .unwrap(),
            },
            username: author.username.clone(),
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#x27;y&#x27;&lt;/script&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_index_escapes_post_content() {
        let alice = user(1, "alice");
        let posts = vec![listing(1, &alice, "<b>bold</b>")];

        let html = index_page(None, &posts);
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!html.contains("<b>bold</b>"));
        assert!(html.contains("by alice on 2024-05-01"));
    }

    #[test]
    fn test_index_edit_links_only_for_author() {
        let alice = user(1, "alice");
        let bob = user(2, "bob");
        let posts = vec![listing(10, &alice, "Hi")];

        assert!(index_page(Some(&alice), &posts).contains(r#"href="/10/update""#));
        assert!(!index_page(Some(&bob), &posts).contains(r#"href="/10/update""#));
        assert!(!index_page(None, &posts).contains(r#"href="/10/update""#));
    }

    #[test]
    fn test_nav_reflects_login_state() {
        let alice = user(1, "alice");

        let anonymous = index_page(None, &[]);
        assert!(anonymous.contains("/auth/login"));
        assert!(!anonymous.contains("/auth/logout"));

        let logged_in = index_page(Some(&alice), &[]);
        assert!(logged_in.contains("/auth/logout"));
        assert!(logged_in.contains("alice"));
    }

    #[test]
    fn test_form_pages_show_error() {
        let html = register_page(None, "alice", Some("Password is required."));
        assert!(html.contains(r#"<div class="flash">Password is required.</div>"#));
        assert!(html.contains(r#"value="alice""#));
    }

    #[test]
    fn test_error_page_nav() {
        let alice = user(1, "alice");

        let html = error_page(Some(&alice), StatusCode::NOT_FOUND, "Post id 9 doesn't exist.");
        assert!(html.contains("<title>Not Found - Blog</title>"));
        assert!(html.contains("/auth/logout"));

        let html = error_page(None, StatusCode::FORBIDDEN, "nope");
        assert!(html.contains("/auth/login"));
    }

    #[test]
    fn test_update_page_has_delete_form() {
        let alice = user(1, "alice");
        let form = PostForm {
            title: "Hi".to_string(),
            body: "body".to_string(),
        };

        let html = update_page(&alice, 5, &form, None);
        assert!(html.contains(r#"action="/5/update""#));
        assert!(html.contains(r#"action="/5/delete""#));
    }
}
