use axum::http::StatusCode;
use maud::{DOCTYPE, Markup, html};

use crate::{
    entities::movie,
    models::{Candidate, RankedMovie},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const INPUT_CLASS: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const BUTTON_CLASS: &str =
    "rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700";

pub fn index_page(movies: &[RankedMovie]) -> String {
    page(
        "My Top Movies",
        html! {
            div class="max-w-4xl mx-auto px-6 py-12" {
                div class="flex items-start justify-between gap-6" {
                    div {
                        h1 class="text-3xl font-bold text-gray-900" { "My Top Movies" }
                        p class="mt-2 text-gray-600" { "These are my all-time favourite movies." }
                    }
                    a class=(BUTTON_CLASS) href="/add" { "Add Movie" }
                }

                @if movies.is_empty() {
                    div class="mt-10 bg-white shadow rounded-lg p-8" {
                        p class="text-gray-600" { "No movies yet. Search for one to get started." }
                    }
                } @else {
                    div class="mt-10 space-y-4" {
                        @for ranked in movies {
                            (movie_card(ranked))
                        }
                    }
                }
            }
        },
    )
}

pub fn add_page() -> String {
    narrow_page(
        "Add a Movie",
        html! {
            h1 class="text-2xl font-bold text-gray-900" { "Add a Movie" }
            form class="mt-6 space-y-6" method="post" action="/add" {
                div {
                    label class="block text-sm font-medium text-gray-700" for="title" { "Movie Title" }
                    input class=(INPUT_CLASS) name="title" id="title" required;
                }
                button class=(BUTTON_CLASS) type="submit" { "Add Movie" }
            }
        },
    )
}

pub fn select_page(query: &str, candidates: &[Candidate]) -> String {
    narrow_page(
        "Select Movie",
        html! {
            h1 class="text-2xl font-bold text-gray-900" { "Select Movie" }
            p class="mt-2 text-gray-600" { "Results for \"" (query) "\"" }

            @if candidates.is_empty() {
                p class="mt-6 text-gray-600" { "Nothing matched that title." }
            } @else {
                ul class="mt-6 divide-y divide-gray-200" {
                    @for candidate in candidates {
                        li class="py-3" {
                            form method="post" action="/find" class="flex items-center justify-between gap-4" {
                                input type="hidden" name="id" value=(candidate.id);
                                span class="text-gray-900" {
                                    (candidate.display_title())
                                    @if let Some(year) = candidate.year() {
                                        span class="ml-2 text-gray-500" { "(" (year) ")" }
                                    }
                                }
                                button class="text-sm text-blue-600 hover:text-blue-800" type="submit" { "Select" }
                            }
                        }
                    }
                }
            }
            a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/add" { "Search again" }
        },
    )
}

pub fn edit_page(movie: &movie::Model) -> String {
    let rating = movie.rating.map(|r| r.to_string()).unwrap_or_default();

    narrow_page(
        "Rate Movie",
        html! {
            h1 class="text-2xl font-bold text-gray-900" { (movie.title) }
            p class="mt-2 text-gray-600" {
                @if movie.is_rated() { "Edit movie rating" } @else { "Rate this movie" }
            }
            form class="mt-6 space-y-6" method="post" action=(format!("/edit?id={}", movie.id)) {
                div {
                    label class="block text-sm font-medium text-gray-700" for="rating" { "Your Rating Out of 10 e.g. 7.5" }
                    input class=(INPUT_CLASS) name="rating" id="rating" value=(rating) required;
                }
                div {
                    label class="block text-sm font-medium text-gray-700" for="review" { "Your Review" }
                    input class=(INPUT_CLASS) name="review" id="review" maxlength="250" value=(movie.review.as_deref().unwrap_or_default());
                }
                button class=(BUTTON_CLASS) type="submit" { "Done" }
            }
        },
    )
}

pub fn delete_page(movie: &movie::Model) -> String {
    narrow_page(
        "Delete Movie",
        html! {
            div class="rounded-md bg-yellow-50 p-4 text-yellow-800" { "You are about to delete this movie." }
            h1 class="mt-6 text-2xl font-bold text-gray-900" {
                (movie.title) span class="ml-2 font-normal text-gray-500" { "(" (movie.year) ")" }
            }
            form class="mt-6 flex items-center gap-6" method="post" action=(format!("/delete?id={}", movie.id)) {
                button class="rounded-md bg-red-600 px-4 py-2 font-semibold text-white hover:bg-red-700" type="submit" { "Delete" }
                a class="text-gray-600 hover:text-gray-800" href="/" { "Cancel" }
            }
        },
    )
}

pub fn error_page(status: StatusCode, message: String) -> String {
    narrow_page(
        "Error",
        html! {
            h1 class="text-2xl font-bold text-gray-900" { "Error" }
            p class="mt-1 text-sm text-gray-500" { (status.to_string()) }
            p class="mt-4 text-gray-700" { (message) }
            a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body class="min-h-screen bg-gray-50" { (body) }
        }
    }
    .into_string()
}

fn narrow_page(title: &str, inner: Markup) -> String {
    page(
        title,
        html! {
            div class="max-w-xl mx-auto px-6 py-12" {
                div class="bg-white shadow rounded-lg p-8" { (inner) }
            }
        },
    )
}

fn movie_card(ranked: &RankedMovie) -> Markup {
    let movie = &ranked.movie;

    html! {
        div class="bg-white shadow rounded-lg p-6 flex gap-6" {
            img class="w-32 rounded" src=(movie.img_url) alt=(movie.title);
            div class="flex-1" {
                div class="flex items-start justify-between gap-4" {
                    h2 class="text-xl font-semibold text-gray-900" {
                        span class="mr-2 text-gray-400" { "#" (ranked.rank) }
                        (movie.title)
                        span class="ml-2 font-normal text-gray-500" { "(" (movie.year) ")" }
                    }
                    @if let Some(rating) = movie.rating {
                        span class="text-lg font-bold text-amber-600" { (format!("{rating:.1}")) }
                    } @else {
                        span class="text-sm text-gray-400" { "Not rated" }
                    }
                }
                @if let Some(review) = &movie.review {
                    p class="mt-2 italic text-gray-700" { "\u{201c}" (review) "\u{201d}" }
                }
                p class="mt-2 text-sm text-gray-600" { (movie.description) }
                div class="mt-4 flex gap-4 text-sm" {
                    a class="text-blue-600 hover:text-blue-800" href=(format!("/edit?id={}", movie.id)) { "Update" }
                    a class="text-red-600 hover:text-red-800" href=(format!("/delete?id={}", movie.id)) { "Delete" }
                }
            }
        }
    }
}
