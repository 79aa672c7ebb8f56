mod correction;
mod manuscript;
mod notification;
mod volume;
