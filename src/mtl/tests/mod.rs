mod solar_tests;
