//! Sine lookup table shared by the oscillators and the LFOs.

/// Number of entries in [`SINE_LUT`]. A 16-bit phase indexes it through `phase >> 6`.
pub const SINE_LUT_LEN: usize = 1024;

/// One full sine period, offset-binary: `32768 + 32767 * sin(2πi / 1024)`.
#[rustfmt::skip]
pub static SINE_LUT: [u16; SINE_LUT_LEN] = [
    32768, 32969, 33170, 33371, 33572, 33773, 33974, 34175, 34376, 34577, 34777, 34978,
    35178, 35379, 35579, 35780, 35980, 36180, 36380, 36579, 36779, 36978, 37178, 37377,
    37576, 37775, 37973, 38172, 38370, 38568, 38766, 38963, 39161, 39358, 39554, 39751,
    39947, 40143, 40339, 40535, 40730, 40925, 41119, 41313, 41507, 41701, 41894, 42087,
    42280, 42472, 42664, 42855, 43046, 43237, 43427, 43617, 43807, 43996, 44185, 44373,
    44561, 44748, 44935, 45121, 45307, 45493, 45678, 45862, 46047, 46230, 46413, 46596,
    46778, 46959, 47140, 47321, 47500, 47680, 47858, 48037, 48214, 48391, 48568, 48744,
    48919, 49093, 49267, 49441, 49614, 49786, 49957, 50128, 50298, 50468, 50637, 50805,
    50972, 51139, 51305, 51471, 51636, 51800, 51963, 52125, 52287, 52448, 52609, 52768,
    52927, 53085, 53243, 53399, 53555, 53710, 53864, 54018, 54171, 54322, 54473, 54624,
    54773, 54922, 55069, 55216, 55362, 55507, 55652, 55795, 55938, 56079, 56220, 56360,
    56499, 56638, 56775, 56911, 57047, 57181, 57315, 57448, 57579, 57710, 57840, 57969,
    58097, 58224, 58350, 58476, 58600, 58723, 58845, 58966, 59087, 59206, 59324, 59442,
    59558, 59673, 59787, 59901, 60013, 60124, 60234, 60343, 60451, 60558, 60664, 60769,
    60873, 60976, 61078, 61179, 61278, 61377, 61474, 61571, 61666, 61760, 61853, 61945,
    62036, 62126, 62215, 62302, 62389, 62474, 62559, 62642, 62724, 62805, 62885, 62963,
    63041, 63117, 63192, 63266, 63339, 63411, 63482, 63551, 63620, 63687, 63753, 63818,
    63881, 63944, 64005, 64065, 64124, 64182, 64238, 64294, 64348, 64401, 64453, 64504,
    64553, 64601, 64648, 64694, 64739, 64782, 64825, 64866, 64905, 64944, 64981, 65018,
    65053, 65086, 65119, 65150, 65180, 65209, 65237, 65263, 65289, 65313, 65335, 65357,
    65377, 65396, 65414, 65431, 65446, 65460, 65473, 65485, 65496, 65505, 65513, 65520,
    65525, 65529, 65533, 65534, 65535, 65534, 65533, 65529, 65525, 65520, 65513, 65505,
    65496, 65485, 65473, 65460, 65446, 65431, 65414, 65396, 65377, 65357, 65335, 65313,
    65289, 65263, 65237, 65209, 65180, 65150, 65119, 65086, 65053, 65018, 64981, 64944,
    64905, 64866, 64825, 64782, 64739, 64694, 64648, 64601, 64553, 64504, 64453, 64401,
    64348, 64294, 64238, 64182, 64124, 64065, 64005, 63944, 63881, 63818, 63753, 63687,
    63620, 63551, 63482, 63411, 63339, 63266, 63192, 63117, 63041, 62963, 62885, 62805,
    62724, 62642, 62559, 62474, 62389, 62302, 62215, 62126, 62036, 61945, 61853, 61760,
    61666, 61571, 61474, 61377, 61278, 61179, 61078, 60976, 60873, 60769, 60664, 60558,
    60451, 60343, 60234, 60124, 60013, 59901, 59787, 59673, 59558, 59442, 59324, 59206,
    59087, 58966, 58845, 58723, 58600, 58476, 58350, 58224, 58097, 57969, 57840, 57710,
    57579, 57448, 57315, 57181, 57047, 56911, 56775, 56638, 56499, 56360, 56220, 56079,
    55938, 55795, 55652, 55507, 55362, 55216, 55069, 54922, 54773, 54624, 54473, 54322,
    54171, 54018, 53864, 53710, 53555, 53399, 53243, 53085, 52927, 52768, 52609, 52448,
    52287, 52125, 51963, 51800, 51636, 51471, 51305, 51139, 50972, 50805, 50637, 50468,
    50298, 50128, 49957, 49786, 49614, 49441, 49267, 49093, 48919, 48744, 48568, 48391,
    48214, 48037, 47858, 47680, 47500, 47321, 47140, 46959, 46778, 46596, 46413, 46230,
    46047, 45862, 45678, 45493, 45307, 45121, 44935, 44748, 44561, 44373, 44185, 43996,
    43807, 43617, 43427, 43237, 43046, 42855, 42664, 42472, 42280, 42087, 41894, 41701,
    41507, 41313, 41119, 40925, 40730, 40535, 40339, 40143, 39947, 39751, 39554, 39358,
    39161, 38963, 38766, 38568, 38370, 38172, 37973, 37775, 37576, 37377, 37178, 36978,
    36779, 36579, 36380, 36180, 35980, 35780, 35579, 35379, 35178, 34978, 34777, 34577,
    34376, 34175, 33974, 33773, 33572, 33371, 33170, 32969, 32768, 32567, 32366, 32165,
    31964, 31763, 31562, 31361, 31160, 30959, 30759, 30558, 30358, 30157, 29957, 29756,
    29556, 29356, 29156, 28957, 28757, 28558, 28358, 28159, 27960, 27761, 27563, 27364,
    27166, 26968, 26770, 26573, 26375, 26178, 25982, 25785, 25589, 25393, 25197, 25001,
    24806, 24611, 24417, 24223, 24029, 23835, 23642, 23449, 23256, 23064, 22872, 22681,
    22490, 22299, 22109, 21919, 21729, 21540, 21351, 21163, 20975, 20788, 20601, 20415,
    20229, 20043, 19858, 19674, 19489, 19306, 19123, 18940, 18758, 18577, 18396, 18215,
    18036, 17856, 17678, 17499, 17322, 17145, 16968, 16792, 16617, 16443, 16269, 16095,
    15922, 15750, 15579, 15408, 15238, 15068, 14899, 14731, 14564, 14397, 14231, 14065,
    13900, 13736, 13573, 13411, 13249, 13088, 12927, 12768, 12609, 12451, 12293, 12137,
    11981, 11826, 11672, 11518, 11365, 11214, 11063, 10912, 10763, 10614, 10467, 10320,
    10174, 10029, 9884, 9741, 9598, 9457, 9316, 9176, 9037, 8898, 8761, 8625,
    8489, 8355, 8221, 8088, 7957, 7826, 7696, 7567, 7439, 7312, 7186, 7060,
    6936, 6813, 6691, 6570, 6449, 6330, 6212, 6094, 5978, 5863, 5749, 5635,
    5523, 5412, 5302, 5193, 5085, 4978, 4872, 4767, 4663, 4560, 4458, 4357,
    4258, 4159, 4062, 3965, 3870, 3776, 3683, 3591, 3500, 3410, 3321, 3234,
    3147, 3062, 2977, 2894, 2812, 2731, 2651, 2573, 2495, 2419, 2344, 2270,
    2197, 2125, 2054, 1985, 1916, 1849, 1783, 1718, 1655, 1592, 1531, 1471,
    1412, 1354, 1298, 1242, 1188, 1135, 1083, 1032, 983, 935, 888, 842,
    797, 754, 711, 670, 631, 592, 555, 518, 483, 450, 417, 386,
    356, 327, 299, 273, 247, 223, 201, 179, 159, 140, 122, 105,
    90, 76, 63, 51, 40, 31, 23, 16, 11, 7, 3, 2,
    1, 2, 3, 7, 11, 16, 23, 31, 40, 51, 63, 76,
    90, 105, 122, 140, 159, 179, 201, 223, 247, 273, 299, 327,
    356, 386, 417, 450, 483, 518, 555, 592, 631, 670, 711, 754,
    797, 842, 888, 935, 983, 1032, 1083, 1135, 1188, 1242, 1298, 1354,
    1412, 1471, 1531, 1592, 1655, 1718, 1783, 1849, 1916, 1985, 2054, 2125,
    2197, 2270, 2344, 2419, 2495, 2573, 2651, 2731, 2812, 2894, 2977, 3062,
    3147, 3234, 3321, 3410, 3500, 3591, 3683, 3776, 3870, 3965, 4062, 4159,
    4258, 4357, 4458, 4560, 4663, 4767, 4872, 4978, 5085, 5193, 5302, 5412,
    5523, 5635, 5749, 5863, 5978, 6094, 6212, 6330, 6449, 6570, 6691, 6813,
    6936, 7060, 7186, 7312, 7439, 7567, 7696, 7826, 7957, 8088, 8221, 8355,
    8489, 8625, 8761, 8898, 9037, 9176, 9316, 9457, 9598, 9741, 9884, 10029,
    10174, 10320, 10467, 10614, 10763, 10912, 11063, 11214, 11365, 11518, 11672, 11826,
    11981, 12137, 12293, 12451, 12609, 12768, 12927, 13088, 13249, 13411, 13573, 13736,
    13900, 14065, 14231, 14397, 14564, 14731, 14899, 15068, 15238, 15408, 15579, 15750,
    15922, 16095, 16269, 16443, 16617, 16792, 16968, 17145, 17322, 17499, 17678, 17856,
    18036, 18215, 18396, 18577, 18758, 18940, 19123, 19306, 19489, 19674, 19858, 20043,
    20229, 20415, 20601, 20788, 20975, 21163, 21351, 21540, 21729, 21919, 22109, 22299,
    22490, 22681, 22872, 23064, 23256, 23449, 23642, 23835, 24029, 24223, 24417, 24611,
    24806, 25001, 25197, 25393, 25589, 25785, 25982, 26178, 26375, 26573, 26770, 26968,
    27166, 27364, 27563, 27761, 27960, 28159, 28358, 28558, 28757, 28957, 29156, 29356,
    29556, 29756, 29957, 30157, 30358, 30558, 30759, 30959, 31160, 31361, 31562, 31763,
    31964, 32165, 32366, 32567,
];
