mod admin;
mod quiz_models;
mod quiz_routes;
