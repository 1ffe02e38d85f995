//! Diesel schema for todo persistence.

diesel::table! {
    /// Todo records with an optimistic-concurrency version counter.
    todos (id) {
        /// Store-assigned identifier.
        id -> Int8,
        /// Todo name.
        #[max_length = 255]
        name -> Varchar,
        /// Completion flag.
        is_complete -> Bool,
        /// Incremented on every committed update.
        version -> Int8,
    }
}
