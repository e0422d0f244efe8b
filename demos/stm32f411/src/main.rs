#![no_std]
#![no_main]

use core::fmt::Write;

use panic_rtt_target as _;
use rtt_target::{rprintln, rtt_init_print};
use stm32f4xx_hal::{
    i2c::{self, I2c},
    pac,
    prelude::*,
};

use lcd_i2c_backpack::{
    command::{MoveDirection, ShiftType, State},
    lcd::{Config, Lcd},
    sender::I2cSender,
};

// a heart shape
const HEART: [u8; 8] = [
    0b00000, 0b00000, 0b01010, 0b11111, 0b01110, 0b00100, 0b00000, 0b00000,
];

#[cortex_m_rt::entry]
fn main() -> ! {
    rtt_init_print!();

    let dp = pac::Peripherals::take().expect("Cannot take device peripherals");
    let cp = pac::CorePeripherals::take().expect("Cannot take core peripherals");

    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.use_hse(12.MHz()).freeze();

    let mut delayer = cp.SYST.delay(&clocks);

    let gpiob = dp.GPIOB.split();

    let mut i2c = I2c::new(
        dp.I2C1,
        (gpiob.pb6, gpiob.pb7),
        i2c::Mode::standard(100.kHz()), // The PCF8574T max I2C speed
        &clocks,
    );

    let mut sender = I2cSender::new(&mut i2c, 0x27);

    // init LCD1602
    let mut lcd = Lcd::new(&mut sender, &mut delayer, Config::new(16, 2))
        .expect("LCD init failed, check wiring and address");

    rprintln!("LCD ready");

    // draw a little heart in CGRAM, then go back to DDRAM
    lcd.write_graph_to_cgram(1, &HEART).unwrap();
    lcd.set_cursor_pos((0, 0)).unwrap();

    lcd.write_str_to_cur("hello, world").unwrap();
    lcd.write_graph_to_cur(1).unwrap();

    // row 5 doesn't exist, it's clamped to the second row
    lcd.set_cursor_pos((0, 5)).unwrap();
    write!(lcd, "uptime {}s", 0).unwrap();

    lcd.set_cursor_state(State::On).unwrap();
    lcd.set_cursor_blink_state(State::On).unwrap();

    // scroll the display window back and forth
    (0..4).for_each(|_| {
        lcd.delay_ms(250);
        lcd.shift_cursor_or_display(ShiftType::CursorAndDisplay, MoveDirection::RightToLeft)
            .unwrap();
    });
    (0..4).for_each(|_| {
        lcd.delay_ms(250);
        lcd.shift_cursor_or_display(ShiftType::CursorAndDisplay, MoveDirection::LeftToRight)
            .unwrap();
    });

    let mut seconds = 0u32;
    loop {
        lcd.delay_ms(1_000);
        seconds += 1;

        lcd.set_cursor_pos((7, 1)).unwrap();
        write!(lcd, "{}s", seconds).unwrap();

        // blink backlight every 10 seconds
        if seconds % 10 == 0 {
            lcd.set_backlight(State::Off).unwrap();
            lcd.delay_ms(200);
            lcd.set_backlight(State::On).unwrap();
        }
    }
}
