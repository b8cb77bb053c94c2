pub mod configuration;

pub mod manager {
    pub mod namedobject;
    pub mod managererror;
    pub mod manager;
}

pub mod time {
    pub mod utility;
    pub mod rangeofdates;

    pub mod recurringholiday {
        pub mod recurringholiday;
        pub mod fixeddateholiday;
        pub mod lunarholiday;
    }

    pub mod calendar {
        pub mod holidaycalendar;
        pub mod regionprofile;
        pub mod customholiday;
        pub mod holidayengine;
        pub mod precomputedholidaycalendar;
        pub mod holidaycalendarmanager;
    }
}
