//! Maps a framed request onto its handler.
//!
//! Routing keys on the normalized path-base ([`Request::base`]), the
//! method, and two auxiliary predicates: whether the trailing path
//! segment is a nonnegative integer id, and whether a query string is
//! present. The arms form an ordered decision list and the first match
//! wins; anything unmatched is a 404.

use gamehub_http::method::Method;
use gamehub_http::request::Request;
use gamehub_http::response::{Response, StatusCode};
use gamehub_http::target::is_integer;

use crate::handlers::{achievements, error, games, into_response, library, reviews, users};
use crate::store::Store;

pub fn dispatch(store: &Store, request: &Request) -> Response {
    // Preflight wins over every route.
    if request.method == Method::Options {
        return Response::preflight();
    }

    let base = request.base();
    let query = request.query();
    let id = request.id();
    let int_id = id.as_deref().filter(|candidate| is_integer(candidate));

    let result = match (base.as_str(), &request.method, int_id) {
        ("/games", Method::Get, Some(id)) => games::get_by_id(store, id),
        ("/games", Method::Get, _) => games::list(store),
        ("/games", Method::Post, _) => games::create(store, &request.body),
        ("/games", Method::Delete, Some(id)) => games::delete_by_id(store, id),
        ("/games", Method::Patch, Some(id)) => games::patch_by_id(store, id, &request.body),
        ("/register", Method::Post, _) => users::register(store, &request.body),
        ("/login", Method::Post, _) => users::login(store, &request.body),
        ("/reviews/game", Method::Get, Some(id)) => reviews::list_for_game(store, id),
        ("/reviews/game", Method::Post, Some(id)) => reviews::create(store, id, &request.body),
        ("/me/games", Method::Get, _) if !query.is_empty() => library::list(store, &query),
        ("/me/games", Method::Post, _) => library::add(store, &request.body),
        ("/me/games", Method::Delete, Some(id)) => library::remove(store, id, &query),
        ("/achievements", Method::Get, Some(id)) => achievements::get_by_id(store, id),
        ("/achievements", Method::Post, _) => achievements::create(store, &request.body),
        ("/achievements", Method::Patch, Some(id)) => {
            achievements::patch_by_id(store, id, &request.body)
        }
        ("/achievements", Method::Delete, Some(id)) => achievements::delete_by_id(store, id),
        ("/achievements/game", Method::Get, Some(id)) => achievements::for_game(store, id),
        ("/me", Method::Patch, _) => users::patch(store, &query, &request.body),
        ("/me/achievements", Method::Get, Some(id)) => {
            achievements::unlocked_for_game(store, id, &query)
        }
        ("/me/achievements", Method::Get, _) => achievements::unlocked(store, &query),
        ("/me/achievements", Method::Post, _) => achievements::unlock(store, &request.body),
        ("/me/posted-games", Method::Get, _) => games::posted_by_user(store, &query),
        _ => Err(error(StatusCode::NOT_FOUND, "Not Found.")),
    };
    into_response(result)
}
