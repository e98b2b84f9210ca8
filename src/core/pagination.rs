//! Lazy pagination over continuation-token APIs
//!
//! [`paginate`] turns any [`PageSource`] into a finite stream of items. Pages
//! are fetched only as the stream is polled, the stream ends on the first page
//! without a continuation token, and every call starts again from the first
//! page.

use crate::adapters::traits::PageSource;
use crate::domain::Result;
use futures::stream::{self, Stream, StreamExt, TryStreamExt};

enum Cursor {
    First,
    Next(String),
    Done,
}

async fn next_page<S>(source: &S, cursor: Cursor) -> Result<Option<(Vec<S::Item>, Cursor)>>
where
    S: PageSource + ?Sized,
{
    let token = match cursor {
        Cursor::First => None,
        Cursor::Next(token) => Some(token),
        Cursor::Done => return Ok(None),
    };

    let page = source.fetch_page(token).await?;
    let cursor = match page.next_token {
        Some(token) if !token.is_empty() => Cursor::Next(token),
        _ => Cursor::Done,
    };

    Ok(Some((page.items, cursor)))
}

/// Stream of whole pages.
pub fn pages<'a, S>(source: &'a S) -> impl Stream<Item = Result<Vec<S::Item>>> + Send + 'a
where
    S: PageSource + ?Sized,
    S::Item: 'a,
{
    stream::try_unfold(Cursor::First, move |cursor| next_page(source, cursor))
}

/// Stream of items across all pages.
pub fn paginate<'a, S>(source: &'a S) -> impl Stream<Item = Result<S::Item>> + Send + 'a
where
    S: PageSource + ?Sized,
    S::Item: 'a,
{
    pages(source)
        .map_ok(|items| stream::iter(items.into_iter().map(Ok)))
        .try_flatten()
}

/// Reads every page and returns the items in order.
///
/// # Errors
///
/// Returns the first error raised while fetching a page.
pub async fn collect_all<S>(source: &S) -> Result<Vec<S::Item>>
where
    S: PageSource + ?Sized,
{
    paginate(source).try_collect().await
}
