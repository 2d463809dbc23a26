mod property_appends;
mod removal;
