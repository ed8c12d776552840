mod validate_good;
