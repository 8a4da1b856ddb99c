fn main() {
    // Emits the ESP-IDF toolchain environment when cross-compiling for the
    // target; a no-op for host-target test builds.
    embuild::espidf::sysenv::output();
}
