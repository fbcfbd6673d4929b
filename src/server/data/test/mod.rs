mod achievement;
mod course;
mod module;
mod notification;
mod progress;
mod section;
mod unit;
mod user;
